use crate::error::{MsmsError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier for teachers and students. The two kinds use separate ID spaces.
pub type EntityId = u32;

pub const GRADE_MIN: f64 = 0.0;
pub const GRADE_MAX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Teacher,
    Student,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Teacher => write!(f, "Teacher"),
            EntityKind::Student => write!(f, "Student"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: EntityId,
    pub name: String,
    pub subject: String,
}

impl Teacher {
    /// Merges `patch` over this record and validates the result.
    pub fn apply(&self, patch: &TeacherPatch) -> Result<Teacher> {
        let name = patch.name.as_deref().unwrap_or(&self.name);
        let subject = patch.subject.as_deref().unwrap_or(&self.subject);
        Ok(Teacher {
            id: self.id,
            name: validate_name(name)?,
            subject: validate_subject(subject)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: EntityId,
    pub name: String,
    pub grade: f64,
}

impl Student {
    /// Merges `patch` over this record and validates the result.
    pub fn apply(&self, patch: &StudentPatch) -> Result<Student> {
        let name = patch.name.as_deref().unwrap_or(&self.name);
        let grade = patch.grade.unwrap_or(self.grade);
        Ok(Student {
            id: self.id,
            name: validate_name(name)?,
            grade: validate_grade(grade)?,
        })
    }
}

/// A single check-in. Never modified after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub student_id: EntityId,
    // Name at check-in time, kept so history survives the student's removal
    #[serde(default)]
    pub student_name: String,
    pub course_id: String,
    pub timestamp: DateTime<Utc>,
}

/// The whole persisted state. The on-disk file is always one complete
/// serialization of this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppData {
    pub teachers: BTreeMap<EntityId, Teacher>,
    pub students: BTreeMap<EntityId, Student>,
    pub attendance: Vec<AttendanceRecord>,
    pub next_teacher_id: EntityId,
    pub next_student_id: EntityId,
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            teachers: BTreeMap::new(),
            students: BTreeMap::new(),
            attendance: Vec::new(),
            next_teacher_id: 1,
            next_student_id: 1,
        }
    }
}

impl AppData {
    pub fn is_empty(&self) -> bool {
        self.teachers.is_empty() && self.students.is_empty() && self.attendance.is_empty()
    }

    /// Restores the structural invariants of a freshly deserialized snapshot.
    ///
    /// Record IDs are realigned with their map keys and each counter is raised
    /// above the largest ID present. Returns a description of every fix made;
    /// an empty list means the snapshot was already consistent.
    pub fn repair(&mut self) -> Vec<String> {
        let mut fixes = Vec::new();

        for (key, teacher) in self.teachers.iter_mut() {
            if teacher.id != *key {
                fixes.push(format!(
                    "teacher stored under key {} had id {}",
                    key, teacher.id
                ));
                teacher.id = *key;
            }
        }
        for (key, student) in self.students.iter_mut() {
            if student.id != *key {
                fixes.push(format!(
                    "student stored under key {} had id {}",
                    key, student.id
                ));
                student.id = *key;
            }
        }

        let min_teacher_id = lowest_free_id(self.teachers.keys().next_back());
        if self.next_teacher_id < min_teacher_id {
            fixes.push(format!(
                "next_teacher_id raised from {} to {}",
                self.next_teacher_id, min_teacher_id
            ));
            self.next_teacher_id = min_teacher_id;
        }

        let min_student_id = lowest_free_id(self.students.keys().next_back());
        if self.next_student_id < min_student_id {
            fixes.push(format!(
                "next_student_id raised from {} to {}",
                self.next_student_id, min_student_id
            ));
            self.next_student_id = min_student_id;
        }

        fixes
    }
}

// Saturates at `EntityId::MAX`. A counter left equal to an existing ID is
// never issued: `issue_id` refuses to hand out the last value.
fn lowest_free_id(max_key: Option<&EntityId>) -> EntityId {
    max_key.map_or(1, |max| max.saturating_add(1))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeacher {
    pub name: String,
    pub subject: String,
}

impl NewTeacher {
    pub fn new(name: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subject: subject.into(),
        }
    }
}

/// Partial teacher update. `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeacherPatch {
    pub name: Option<String>,
    pub subject: Option<String>,
}

impl TeacherPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.subject.is_none()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub name: String,
    pub grade: f64,
}

impl NewStudent {
    pub fn new(name: impl Into<String>, grade: f64) -> Self {
        Self {
            name: name.into(),
            grade,
        }
    }
}

/// Partial student update. `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub grade: Option<f64>,
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.grade.is_none()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn grade(mut self, grade: f64) -> Self {
        self.grade = Some(grade);
        self
    }
}

pub fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(MsmsError::validation("name must not be empty"));
    }
    Ok(name.to_string())
}

pub fn validate_subject(subject: &str) -> Result<String> {
    let subject = subject.trim();
    if subject.is_empty() {
        return Err(MsmsError::validation("subject must not be empty"));
    }
    Ok(subject.to_string())
}

pub fn validate_grade(grade: f64) -> Result<f64> {
    if !grade.is_finite() || !(GRADE_MIN..=GRADE_MAX).contains(&grade) {
        return Err(MsmsError::validation(format!(
            "grade must be a number between {} and {}, got {}",
            GRADE_MIN, GRADE_MAX, grade
        )));
    }
    Ok(grade)
}

/// Parses a grade typed by a user. Non-numeric input is a validation error,
/// as is a number outside the accepted range.
pub fn parse_grade(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    let grade: f64 = trimmed
        .parse()
        .map_err(|_| MsmsError::validation(format!("grade must be a number, got '{}'", trimmed)))?;
    validate_grade(grade)
}

pub fn validate_course_id(course_id: &str) -> Result<String> {
    let course_id = course_id.trim();
    if course_id.is_empty() {
        return Err(MsmsError::validation("course_id must not be empty"));
    }
    Ok(course_id.to_string())
}
