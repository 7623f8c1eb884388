use crate::commands::helpers::{apply, find_student};
use crate::error::Result;
use crate::model::{validate_course_id, AttendanceRecord, EntityId};
use crate::store::DataStore;
use chrono::Utc;

/// Records that student `student_id` attended `course_id` now.
///
/// The student must exist at call time. `course_id` is free-form; there is no
/// course catalog to check it against.
pub fn check_in<S: DataStore>(
    store: &mut S,
    student_id: EntityId,
    course_id: &str,
) -> Result<AttendanceRecord> {
    apply(store, |data| {
        let student = find_student(data, student_id)?;
        let course_id = validate_course_id(course_id)?;
        let record = AttendanceRecord {
            student_id,
            student_name: student.name.clone(),
            course_id,
            timestamp: Utc::now(),
        };
        data.attendance.push(record.clone());
        Ok(record)
    })
}

/// Check-ins recorded for `student_id`, oldest first. Works for removed
/// students too, since history is never pruned.
pub fn history<S: DataStore>(store: &S, student_id: EntityId) -> Vec<AttendanceRecord> {
    store
        .data()
        .attendance
        .iter()
        .filter(|record| record.student_id == student_id)
        .cloned()
        .collect()
}
