use super::menu;
use super::render::{
    print_attendance, print_load_outcome, print_messages, print_statistics, student_line,
    teacher_line, CmdMessage,
};
use super::setup::{Cli, Commands, StudentCommands, TeacherCommands};
use clap::Parser;
use msms::api::MsmsApi;
use msms::config::MsmsConfig;
use msms::error::Result;
use msms::model::{parse_grade, EntityId, NewStudent, NewTeacher, StudentPatch, TeacherPatch};
use msms::store::fs::JsonFileStore;
use msms::{logging, store};
use std::path::PathBuf;

pub struct AppContext {
    pub api: MsmsApi<JsonFileStore>,
    pub config: MsmsConfig,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Runs on a throwaway file, so the real data file is never opened.
    if cli.self_test {
        return Ok(handle_self_test()?);
    }

    let mut ctx = init_context(&cli)?;

    match cli.command {
        None | Some(Commands::Menu) => menu::run(&mut ctx),
        Some(command) => Ok(handle_command(&mut ctx, command)?),
    }
}

fn handle_command(ctx: &mut AppContext, command: Commands) -> Result<()> {
    let messages = match command {
        Commands::Teacher(cmd) => handle_teacher(ctx, cmd)?,
        Commands::Student(cmd) => handle_student(ctx, cmd)?,
        Commands::CheckIn {
            student_id,
            course_id,
        } => check_in(ctx, student_id, &course_id)?,
        Commands::Attendance { student_id } => handle_attendance(ctx, student_id),
        Commands::Card { student_id, output } => print_card(ctx, student_id, output)?,
        Commands::Stats { json } => handle_stats(ctx, json)?,
        Commands::Menu => Vec::new(),
    };
    print_messages(&messages);
    Ok(())
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config = MsmsConfig::resolve(cli.config.as_deref())?;
    let data_file = cli.data.clone().unwrap_or_else(|| config.data_file.clone());

    let store = JsonFileStore::open(&data_file)?;
    print_load_outcome(store.outcome(), store.path());

    Ok(AppContext {
        api: MsmsApi::new(store),
        config,
    })
}

fn handle_self_test() -> Result<()> {
    store::self_test()?;
    print_messages(&[CmdMessage::success("Self-test passed: data round-trip OK")]);
    Ok(())
}

fn handle_teacher(ctx: &mut AppContext, cmd: TeacherCommands) -> Result<Vec<CmdMessage>> {
    match cmd {
        TeacherCommands::Add { name, subject } => add_teacher(ctx, NewTeacher::new(name, subject)),
        TeacherCommands::Update { id, name, subject } => {
            let mut patch = TeacherPatch::default();
            if let Some(name) = name {
                patch = patch.name(name);
            }
            if let Some(subject) = subject {
                patch = patch.subject(subject);
            }
            update_teacher(ctx, id, &patch)
        }
        TeacherCommands::Remove { id } => remove_teacher(ctx, id),
    }
}

fn handle_student(ctx: &mut AppContext, cmd: StudentCommands) -> Result<Vec<CmdMessage>> {
    match cmd {
        StudentCommands::Add { name, grade } => {
            add_student(ctx, NewStudent::new(name, parse_grade(&grade)?))
        }
        StudentCommands::Update { id, name, grade } => {
            let mut patch = StudentPatch::default();
            if let Some(name) = name {
                patch = patch.name(name);
            }
            if let Some(grade) = grade {
                patch = patch.grade(parse_grade(&grade)?);
            }
            update_student(ctx, id, &patch)
        }
        StudentCommands::Remove { id } => remove_student(ctx, id),
    }
}

fn handle_attendance(ctx: &AppContext, student_id: EntityId) -> Vec<CmdMessage> {
    print_attendance(&ctx.api.attendance_history(student_id));
    if ctx.api.data().students.contains_key(&student_id) {
        Vec::new()
    } else {
        vec![CmdMessage::info(format!(
            "Student ID {} is not on record, showing retained check-ins only",
            student_id
        ))]
    }
}

fn handle_stats(ctx: &AppContext, json: bool) -> Result<Vec<CmdMessage>> {
    let stats = ctx.api.statistics();
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_statistics(&stats);
    }
    Ok(Vec::new())
}

// Shared by the subcommands and the interactive menu.

pub fn add_teacher(ctx: &mut AppContext, fields: NewTeacher) -> Result<Vec<CmdMessage>> {
    let name = fields.name.trim().to_string();
    let id = ctx.api.add_teacher(fields)?;
    Ok(vec![CmdMessage::success(format!(
        "Teacher '{}' added with ID {}",
        name, id
    ))])
}

pub fn update_teacher(
    ctx: &mut AppContext,
    id: EntityId,
    patch: &TeacherPatch,
) -> Result<Vec<CmdMessage>> {
    let teacher = ctx.api.update_teacher(id, patch)?;
    Ok(vec![CmdMessage::success(format!(
        "Teacher updated: {}",
        teacher_line(&teacher)
    ))])
}

pub fn remove_teacher(ctx: &mut AppContext, id: EntityId) -> Result<Vec<CmdMessage>> {
    let teacher = ctx.api.remove_teacher(id)?;
    Ok(vec![CmdMessage::success(format!(
        "Teacher removed: {}",
        teacher_line(&teacher)
    ))])
}

pub fn add_student(ctx: &mut AppContext, fields: NewStudent) -> Result<Vec<CmdMessage>> {
    let name = fields.name.trim().to_string();
    let id = ctx.api.add_student(fields)?;
    Ok(vec![CmdMessage::success(format!(
        "Student '{}' added with ID {}",
        name, id
    ))])
}

pub fn update_student(
    ctx: &mut AppContext,
    id: EntityId,
    patch: &StudentPatch,
) -> Result<Vec<CmdMessage>> {
    let student = ctx.api.update_student(id, patch)?;
    Ok(vec![CmdMessage::success(format!(
        "Student updated: {}",
        student_line(&student)
    ))])
}

pub fn remove_student(ctx: &mut AppContext, id: EntityId) -> Result<Vec<CmdMessage>> {
    let student = ctx.api.remove_student(id)?;
    Ok(vec![
        CmdMessage::success(format!("Student removed: {}", student_line(&student))),
        CmdMessage::info("Their attendance records are kept"),
    ])
}

pub fn check_in(
    ctx: &mut AppContext,
    student_id: EntityId,
    course_id: &str,
) -> Result<Vec<CmdMessage>> {
    let record = ctx.api.check_in(student_id, course_id)?;
    Ok(vec![CmdMessage::success(format!(
        "{} (ID {}) checked in for {} at {}",
        record.student_name,
        record.student_id,
        record.course_id,
        record.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ))])
}

pub fn print_card(
    ctx: &AppContext,
    student_id: EntityId,
    output: Option<PathBuf>,
) -> Result<Vec<CmdMessage>> {
    let destination = output.unwrap_or_else(|| ctx.config.card_path(student_id));
    let written = ctx.api.print_student_card(student_id, &destination)?;
    Ok(vec![CmdMessage::success(format!(
        "Student card saved to {}",
        written.display()
    ))])
}
