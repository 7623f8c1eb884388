use crate::error::{MsmsError, Result};
use crate::model::{AppData, EntityId, Student};
use crate::store::DataStore;

/// Runs `change` against a copy of the current snapshot and commits the copy
/// if `change` succeeds. An error from `change` leaves the store untouched
/// and skips the save.
pub fn apply<S, T, F>(store: &mut S, change: F) -> Result<T>
where
    S: DataStore,
    F: FnOnce(&mut AppData) -> Result<T>,
{
    let mut draft = store.data().clone();
    let outcome = change(&mut draft)?;
    store.commit(draft)?;
    Ok(outcome)
}

/// Takes the next ID from `counter` and advances it.
pub fn issue_id(counter: &mut EntityId) -> Result<EntityId> {
    let id = *counter;
    *counter = id
        .checked_add(1)
        .ok_or_else(|| MsmsError::validation("no identifiers left for this kind"))?;
    Ok(id)
}

pub fn find_student(data: &AppData, id: EntityId) -> Result<&Student> {
    data.students
        .get(&id)
        .ok_or_else(|| MsmsError::student_not_found(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn failed_change_does_not_save() {
        let mut store = InMemoryStore::new();
        let result: Result<()> = apply(&mut store, |draft| {
            draft.next_teacher_id = 10;
            Err(MsmsError::validation("nope"))
        });

        assert!(result.is_err());
        assert_eq!(store.data().next_teacher_id, 1);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn issue_id_refuses_to_wrap() {
        let mut counter = EntityId::MAX;
        assert!(issue_id(&mut counter).is_err());
        assert_eq!(counter, EntityId::MAX);
    }
}
