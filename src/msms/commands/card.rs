use crate::commands::helpers::find_student;
use crate::error::{MsmsError, Result};
use crate::model::{EntityId, Student};
use crate::store::DataStore;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

const CARD_WIDTH: usize = 40;

/// File name used when the caller does not pick one.
pub fn default_file_name(student_id: EntityId) -> String {
    format!("student_{}_card.txt", student_id)
}

/// Writes the card for `student_id` to `destination` and returns that path.
pub fn run<S: DataStore>(store: &S, student_id: EntityId, destination: &Path) -> Result<PathBuf> {
    let student = find_student(store.data(), student_id)?;
    let card = render(student, Local::now());

    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| MsmsError::Export {
                path: destination.to_path_buf(),
                source,
            })?;
        }
    }
    fs::write(destination, card).map_err(|source| MsmsError::Export {
        path: destination.to_path_buf(),
        source,
    })?;

    Ok(destination.to_path_buf())
}

pub fn render(student: &Student, generated_at: DateTime<Local>) -> String {
    let double_rule = "=".repeat(CARD_WIDTH);
    let single_rule = "-".repeat(CARD_WIDTH);
    let title = format!("{:^width$}", "Student Card", width = CARD_WIDTH);

    let mut card = String::new();
    card.push_str(&format!("{}\n", double_rule));
    card.push_str(&format!("{}\n", title.trim_end()));
    card.push_str(&format!("{}\n\n", double_rule));
    card.push_str(&format!("ID: {}\n", student.id));
    card.push_str(&format!("Name: {}\n", student.name));
    card.push_str(&format!("Grade: {}\n\n", student.grade));
    card.push_str(&format!("{}\n", single_rule));
    card.push_str(&format!(
        "Generated: {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    card.push_str(&format!("{}\n", double_rule));
    card
}
