//! # MSMS Architecture
//!
//! MSMS keeps the records of a small music school (teachers, students and
//! attendance check-ins) in one JSON file. Like any UI-agnostic library, the
//! core never prompts, prints or exits; the interactive menu in the binary is
//! just one client.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Numbered menu, prompts, scriptable subcommands           │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the store, dispatches to commands, logs mutations   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Registry, attendance, statistics, card export            │
//! │  - Validate first, then commit a whole new snapshot         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait                                          │
//! │  - JsonFileStore (production), InMemoryStore (testing)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Integrity Rules
//!
//! - IDs come from per-kind counters that only ever grow; removal never frees one.
//! - Every successful mutation is saved immediately, as a full snapshot written
//!   through a temp file and a rename. A failed one saves nothing.
//! - Removing a student keeps their attendance; readers tolerate the dangling ID.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic
//! - [`store`]: Storage abstraction, implementations and the self-test
//! - [`model`]: Records, the `AppData` snapshot, validation
//! - [`config`]: Configuration resolution
//! - [`logging`]: `tracing` subscriber setup
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;
