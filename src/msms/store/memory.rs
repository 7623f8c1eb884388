use super::DataStore;
use crate::error::{MsmsError, Result};
use crate::model::AppData;
use std::io;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    data: AppData,
    saves: usize,
    fail_saves: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: AppData) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    /// Make every following save fail with a persistence error.
    pub fn fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }
}

impl DataStore for InMemoryStore {
    fn data(&self) -> &AppData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut AppData {
        &mut self.data
    }

    fn save(&mut self) -> Result<()> {
        if self.fail_saves {
            return Err(MsmsError::persistence(
                "<memory>",
                io::Error::other("simulated save failure"),
            ));
        }
        self.saves += 1;
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Student, Teacher};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_teacher(mut self, name: &str, subject: &str) -> Self {
            let data = self.store.data_mut();
            let id = data.next_teacher_id;
            data.teachers.insert(
                id,
                Teacher {
                    id,
                    name: name.to_string(),
                    subject: subject.to_string(),
                },
            );
            data.next_teacher_id += 1;
            self
        }

        pub fn with_student(mut self, name: &str, grade: f64) -> Self {
            let data = self.store.data_mut();
            let id = data.next_student_id;
            data.students.insert(
                id,
                Student {
                    id,
                    name: name.to_string(),
                    grade,
                },
            );
            data.next_student_id += 1;
            self
        }

        pub fn build(self) -> InMemoryStore {
            self.store
        }
    }
}
