use crate::commands::helpers::{apply, issue_id};
use crate::error::{MsmsError, Result};
use crate::model::{validate_name, validate_subject, EntityId, NewTeacher, Teacher, TeacherPatch};
use crate::store::DataStore;

/// Adds a teacher and returns the assigned ID.
pub fn add<S: DataStore>(store: &mut S, fields: NewTeacher) -> Result<EntityId> {
    let name = validate_name(&fields.name)?;
    let subject = validate_subject(&fields.subject)?;

    apply(store, |data| {
        let id = issue_id(&mut data.next_teacher_id)?;
        data.teachers.insert(id, Teacher { id, name, subject });
        Ok(id)
    })
}

/// Overwrites the supplied fields of teacher `id` and returns the result.
pub fn update<S: DataStore>(store: &mut S, id: EntityId, patch: &TeacherPatch) -> Result<Teacher> {
    apply(store, |data| {
        let current = data
            .teachers
            .get(&id)
            .ok_or_else(|| MsmsError::teacher_not_found(id))?;
        if patch.is_empty() {
            return Err(MsmsError::validation("no teacher fields to update"));
        }
        let updated = current.apply(patch)?;
        data.teachers.insert(id, updated.clone());
        Ok(updated)
    })
}

/// Removes teacher `id`. The ID is never handed out again.
pub fn remove<S: DataStore>(store: &mut S, id: EntityId) -> Result<Teacher> {
    apply(store, |data| {
        data.teachers
            .remove(&id)
            .ok_or_else(|| MsmsError::teacher_not_found(id))
    })
}
