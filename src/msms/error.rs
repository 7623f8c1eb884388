use crate::model::{EntityId, EntityKind};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MsmsError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{kind} ID {id} not found")]
    NotFound { kind: EntityKind, id: EntityId },

    #[error("Persistence error ({}): {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write card {}: {source}", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Self-test failed: {0}")]
    SelfTest(String),
}

impl MsmsError {
    pub fn validation(message: impl Into<String>) -> Self {
        MsmsError::Validation(message.into())
    }

    pub fn teacher_not_found(id: EntityId) -> Self {
        MsmsError::NotFound {
            kind: EntityKind::Teacher,
            id,
        }
    }

    pub fn student_not_found(id: EntityId) -> Self {
        MsmsError::NotFound {
            kind: EntityKind::Student,
            id,
        }
    }

    pub(crate) fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MsmsError::Persistence {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, MsmsError>;
