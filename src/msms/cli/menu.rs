//! The numbered interactive menu.
//!
//! Core errors (bad input, unknown IDs, failed saves) are reported and the
//! menu comes back. Only a failure of the terminal itself ends the session.

use super::commands::{self, AppContext};
use super::render::{print_messages, print_statistics, CmdMessage};
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use msms::error::MsmsError;
use msms::model::{parse_grade, EntityId, NewStudent, NewTeacher, StudentPatch, TeacherPatch};
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddTeacher,
    UpdateTeacher,
    RemoveTeacher,
    AddStudent,
    UpdateStudent,
    RemoveStudent,
    CheckIn,
    PrintCard,
    Statistics,
    Exit,
}

const MENU: [(MenuChoice, &str); 10] = [
    (MenuChoice::AddTeacher, "Add Teacher"),
    (MenuChoice::UpdateTeacher, "Update Teacher"),
    (MenuChoice::RemoveTeacher, "Remove Teacher"),
    (MenuChoice::AddStudent, "Add Student"),
    (MenuChoice::UpdateStudent, "Update Student"),
    (MenuChoice::RemoveStudent, "Remove Student"),
    (MenuChoice::CheckIn, "Student Check-in"),
    (MenuChoice::PrintCard, "Print Student Card"),
    (MenuChoice::Statistics, "Show Statistics"),
    (MenuChoice::Exit, "Exit"),
];

/// Maps the typed selection ("1".."10") to a menu entry.
pub fn parse_choice(input: &str) -> Option<MenuChoice> {
    let number: usize = input.trim().parse().ok()?;
    MENU.get(number.checked_sub(1)?).map(|(choice, _)| *choice)
}

pub fn run(ctx: &mut AppContext) -> anyhow::Result<()> {
    if !std::io::stdin().is_terminal() {
        anyhow::bail!("the interactive menu needs a terminal, see --help for scriptable commands");
    }

    let theme = ColorfulTheme::default();
    loop {
        print_menu();
        let input: String = Input::with_theme(&theme)
            .with_prompt("Choose an option")
            .interact_text()?;

        let Some(choice) = parse_choice(&input) else {
            print_messages(&[CmdMessage::warning(format!(
                "Invalid choice '{}', enter a number from 1 to {}",
                input.trim(),
                MENU.len()
            ))]);
            continue;
        };

        if choice == MenuChoice::Exit {
            print_messages(&[CmdMessage::info("Goodbye!")]);
            return Ok(());
        }

        match dispatch(ctx, &theme, choice) {
            Ok(messages) => print_messages(&messages),
            Err(err) => print_messages(&[recoverable_message(err)?]),
        }
    }
}

/// The message shown for a failed action before the menu comes back.
/// Failures outside the core (terminal I/O) are handed back instead.
fn recoverable_message(err: anyhow::Error) -> anyhow::Result<CmdMessage> {
    match err.downcast::<MsmsError>() {
        Ok(core) => Ok(CmdMessage::error(format!("Error: {}", core))),
        Err(other) => Err(other),
    }
}

fn print_menu() {
    println!();
    println!("{}", "Music School Management System".bold());
    for (number, (_, label)) in MENU.iter().enumerate() {
        println!("  {:>2}. {}", number + 1, label);
    }
}

fn dispatch(
    ctx: &mut AppContext,
    theme: &ColorfulTheme,
    choice: MenuChoice,
) -> anyhow::Result<Vec<CmdMessage>> {
    let messages = match choice {
        MenuChoice::AddTeacher => {
            let name = prompt_text(theme, "Teacher name")?;
            let subject = prompt_text(theme, "Subject")?;
            commands::add_teacher(ctx, NewTeacher::new(name, subject))?
        }
        MenuChoice::UpdateTeacher => {
            let id = prompt_id(theme, "Teacher ID")?;
            let mut patch = TeacherPatch::default();
            if let Some(name) = prompt_optional(theme, "New name (blank to keep)")? {
                patch = patch.name(name);
            }
            if let Some(subject) = prompt_optional(theme, "New subject (blank to keep)")? {
                patch = patch.subject(subject);
            }
            commands::update_teacher(ctx, id, &patch)?
        }
        MenuChoice::RemoveTeacher => {
            let id = prompt_id(theme, "Teacher ID")?;
            commands::remove_teacher(ctx, id)?
        }
        MenuChoice::AddStudent => {
            let name = prompt_text(theme, "Student name")?;
            let grade = parse_grade(&prompt_text(theme, "Grade (0-100)")?)?;
            commands::add_student(ctx, NewStudent::new(name, grade))?
        }
        MenuChoice::UpdateStudent => {
            let id = prompt_id(theme, "Student ID")?;
            let mut patch = StudentPatch::default();
            if let Some(name) = prompt_optional(theme, "New name (blank to keep)")? {
                patch = patch.name(name);
            }
            if let Some(grade) = prompt_optional(theme, "New grade (blank to keep)")? {
                patch = patch.grade(parse_grade(&grade)?);
            }
            commands::update_student(ctx, id, &patch)?
        }
        MenuChoice::RemoveStudent => {
            let id = prompt_id(theme, "Student ID")?;
            commands::remove_student(ctx, id)?
        }
        MenuChoice::CheckIn => {
            let id = prompt_id(theme, "Student ID")?;
            let course_id = prompt_text(theme, "Course ID")?;
            commands::check_in(ctx, id, &course_id)?
        }
        MenuChoice::PrintCard => {
            let id = prompt_id(theme, "Student ID")?;
            let default = ctx.config.card_path(id).display().to_string();
            let output: String = Input::with_theme(theme)
                .with_prompt("Save card to")
                .default(default)
                .interact_text()?;
            commands::print_card(ctx, id, Some(PathBuf::from(output)))?
        }
        MenuChoice::Statistics => {
            print_statistics(&ctx.api.statistics());
            Vec::new()
        }
        MenuChoice::Exit => Vec::new(),
    };
    Ok(messages)
}

// Empty input is passed through so the core reports it as a validation error.
fn prompt_text(theme: &ColorfulTheme, prompt: &str) -> anyhow::Result<String> {
    Ok(Input::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?)
}

fn prompt_optional(theme: &ColorfulTheme, prompt: &str) -> anyhow::Result<Option<String>> {
    let value = prompt_text(theme, prompt)?;
    Ok(if value.trim().is_empty() {
        None
    } else {
        Some(value)
    })
}

fn prompt_id(theme: &ColorfulTheme, prompt: &str) -> anyhow::Result<EntityId> {
    let raw = prompt_text(theme, prompt)?;
    raw.trim().parse::<EntityId>().map_err(|_| {
        MsmsError::validation(format!("'{}' is not a valid ID", raw.trim())).into()
    })
}
