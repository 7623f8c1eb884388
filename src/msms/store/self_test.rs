use super::fs::JsonFileStore;
use super::{DataStore, LoadOutcome};
use crate::error::{MsmsError, Result};
use crate::model::{AppData, AttendanceRecord, Student, Teacher};
use chrono::Utc;
use std::fs;
use std::path::Path;
use tracing::info;
use uuid::Uuid;

/// Checks the persistence contract on a throwaway store under the system
/// temp directory: auto-create, then a save/load round-trip of a populated
/// snapshot. The scratch directory is removed afterwards either way.
pub fn self_test() -> Result<()> {
    let dir = std::env::temp_dir().join(format!("msms-self-test-{}", Uuid::new_v4()));
    let result = run_in(&dir);
    let _ = fs::remove_dir_all(&dir);
    if result.is_ok() {
        info!("store self-test passed");
    }
    result
}

fn run_in(dir: &Path) -> Result<()> {
    let path = dir.join("msms.json");

    let created = JsonFileStore::open(&path)?;
    check(created.outcome() == LoadOutcome::Created, "missing file was not created")?;
    check(created.data() == &AppData::default(), "new store is not empty")?;

    let reopened = JsonFileStore::open(&path)?;
    check(reopened.outcome() == LoadOutcome::Loaded, "created file did not load back")?;
    check(reopened.data() == &AppData::default(), "empty snapshot changed on reload")?;

    let mut store = reopened;
    let sample = sample_data();
    store.commit(sample.clone())?;

    let loaded = JsonFileStore::open(&path)?;
    check(loaded.outcome() == LoadOutcome::Loaded, "saved file did not load back")?;
    check(loaded.data() == &sample, "round-tripped snapshot differs from the saved one")?;
    Ok(())
}

fn check(condition: bool, message: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(MsmsError::SelfTest(message.to_string()))
    }
}

fn sample_data() -> AppData {
    let mut data = AppData::default();
    data.teachers.insert(
        1,
        Teacher {
            id: 1,
            name: "Ms. Smith".into(),
            subject: "Piano".into(),
        },
    );
    data.students.insert(
        2,
        Student {
            id: 2,
            name: "Alice".into(),
            // Needs all 17 significant digits to survive the round-trip
            grade: 39.430133835633676,
        },
    );
    data.attendance.push(AttendanceRecord {
        student_id: 2,
        student_name: "Alice".into(),
        course_id: "MUS101".into(),
        timestamp: Utc::now(),
    });
    data.next_teacher_id = 2;
    data.next_student_id = 3;
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_test_passes_and_cleans_up() {
        self_test().unwrap();
    }
}
