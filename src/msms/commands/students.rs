use crate::commands::helpers::{apply, issue_id};
use crate::error::{MsmsError, Result};
use crate::model::{validate_grade, validate_name, EntityId, NewStudent, Student, StudentPatch};
use crate::store::DataStore;

/// Adds a student and returns the assigned ID.
pub fn add<S: DataStore>(store: &mut S, fields: NewStudent) -> Result<EntityId> {
    let name = validate_name(&fields.name)?;
    let grade = validate_grade(fields.grade)?;

    apply(store, |data| {
        let id = issue_id(&mut data.next_student_id)?;
        data.students.insert(id, Student { id, name, grade });
        Ok(id)
    })
}

/// Overwrites the supplied fields of student `id` and returns the result.
pub fn update<S: DataStore>(store: &mut S, id: EntityId, patch: &StudentPatch) -> Result<Student> {
    apply(store, |data| {
        let current = data
            .students
            .get(&id)
            .ok_or_else(|| MsmsError::student_not_found(id))?;
        if patch.is_empty() {
            return Err(MsmsError::validation("no student fields to update"));
        }
        let updated = current.apply(patch)?;
        data.students.insert(id, updated.clone());
        Ok(updated)
    })
}

/// Removes student `id`. Their attendance records stay in place.
pub fn remove<S: DataStore>(store: &mut S, id: EntityId) -> Result<Student> {
    apply(store, |data| {
        data.students
            .remove(&id)
            .ok_or_else(|| MsmsError::student_not_found(id))
    })
}
