//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every msms operation, whichever UI drives it.
//!
//! The facade:
//! - **Owns** the store, so there is exactly one snapshot per process
//! - **Dispatches** to the matching command function
//! - **Logs** each mutation at `info` level
//!
//! It holds no business logic of its own; that lives in `commands/*.rs`.
//!
//! `MsmsApi<S: DataStore>` is generic over the storage backend:
//! - Production: `MsmsApi<JsonFileStore>`
//! - Testing: `MsmsApi<InMemoryStore>`

use crate::commands;
use crate::error::Result;
use crate::model::{
    AppData, AttendanceRecord, EntityId, NewStudent, NewTeacher, Student, StudentPatch, Teacher,
    TeacherPatch,
};
use crate::store::DataStore;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct MsmsApi<S: DataStore> {
    store: S,
}

impl<S: DataStore> MsmsApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn data(&self) -> &AppData {
        self.store.data()
    }

    pub fn add_teacher(&mut self, fields: NewTeacher) -> Result<EntityId> {
        let id = commands::teachers::add(&mut self.store, fields)?;
        info!(id, "teacher added");
        Ok(id)
    }

    pub fn update_teacher(&mut self, id: EntityId, patch: &TeacherPatch) -> Result<Teacher> {
        let teacher = commands::teachers::update(&mut self.store, id, patch)?;
        info!(id, "teacher updated");
        Ok(teacher)
    }

    pub fn remove_teacher(&mut self, id: EntityId) -> Result<Teacher> {
        let teacher = commands::teachers::remove(&mut self.store, id)?;
        info!(id, "teacher removed");
        Ok(teacher)
    }

    pub fn add_student(&mut self, fields: NewStudent) -> Result<EntityId> {
        let id = commands::students::add(&mut self.store, fields)?;
        info!(id, "student added");
        Ok(id)
    }

    pub fn update_student(&mut self, id: EntityId, patch: &StudentPatch) -> Result<Student> {
        let student = commands::students::update(&mut self.store, id, patch)?;
        info!(id, "student updated");
        Ok(student)
    }

    pub fn remove_student(&mut self, id: EntityId) -> Result<Student> {
        let student = commands::students::remove(&mut self.store, id)?;
        info!(id, "student removed");
        Ok(student)
    }

    pub fn check_in(&mut self, student_id: EntityId, course_id: &str) -> Result<AttendanceRecord> {
        let record = commands::attendance::check_in(&mut self.store, student_id, course_id)?;
        info!(student_id, course_id = %record.course_id, "student checked in");
        Ok(record)
    }

    pub fn attendance_history(&self, student_id: EntityId) -> Vec<AttendanceRecord> {
        commands::attendance::history(&self.store, student_id)
    }

    pub fn statistics(&self) -> Statistics {
        commands::stats::run(&self.store)
    }

    pub fn print_student_card(&self, student_id: EntityId, destination: &Path) -> Result<PathBuf> {
        let path = commands::card::run(&self.store, student_id, destination)?;
        info!(student_id, path = %path.display(), "student card written");
        Ok(path)
    }
}

pub use crate::commands::card::default_file_name as default_card_file_name;
pub use crate::commands::stats::Statistics;
