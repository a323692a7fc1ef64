//! Settings persistence and resource files for the realize watcher.
//!
//! The settings document is a YAML file kept in the `.realize` working
//! directory under a project root, with a legacy copy at the root itself
//! still honoured on read. Alongside it live three append-only resource
//! files (outputs, logs, errors) that collect process output and
//! diagnostics.
//!
//! The public API is organised into these layers:
//!
//! - **[`settings`]**: the document model, path layout and store
//! - **[`resources`]**: opening and purging the resource files
//! - **[`escalation`]**: turning errors into termination by policy
//! - **[`random`]**: letter tokens for temporary names
//! - **[`commands`]**: top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod escalation;
pub mod fs;
pub mod logging;
pub mod random;
pub mod resources;
pub mod settings;
