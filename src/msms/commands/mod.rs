//! # Command Layer
//!
//! This module contains the **core business logic** of msms. Each command group
//! lives in its own submodule and implements plain Rust functions over a
//! [`DataStore`](crate::store::DataStore).
//!
//! ## Role and Responsibilities
//!
//! - Validate inputs before anything is touched
//! - Assign identifiers from the snapshot's counters
//! - Apply the change to a draft copy of the snapshot and commit it, which
//!   persists it (see [`helpers::apply`])
//! - Return typed values: new IDs, updated records, statistics
//!
//! ## What Commands Do NOT Do
//!
//! - **Terminal I/O**: No stdout, stderr, prompts or colors
//! - **Argument parsing**: That's the CLI layer's job
//! - **Exit codes**: Return `Result`, let the caller decide
//!
//! The card exporter is the one command that writes a file of its own, and it
//! never touches the snapshot.
//!
//! ## Testing Strategy
//!
//! Command tests run against `InMemoryStore`, which counts saves. That makes
//! "saved exactly once on success, never on failure" directly checkable.
//!
//! ## Command Modules
//!
//! - [`teachers`]: Add, update and remove teachers
//! - [`students`]: Add, update and remove students
//! - [`attendance`]: Check-ins and attendance history
//! - [`stats`]: Aggregate statistics
//! - [`card`]: Student card export
//! - [`helpers`]: Draft/commit and ID assignment

pub mod attendance;
pub mod card;
pub mod helpers;
pub mod stats;
pub mod students;
pub mod teachers;
