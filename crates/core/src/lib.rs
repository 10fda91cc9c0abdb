//! # Triage Core
//!
//! Core logic for the hospital triage desk.
//!
//! This crate contains:
//! - [`PatientQueue`], an array-backed max-heap ordered by severity and then arrival, with
//!   lookup and in-place priority changes by arrival number
//! - the severity vocabulary and patient records the queue holds
//! - flat-text snapshots (`add <code> <name>` lines) for saving and reloading a queue
//! - [`Session`], the line-oriented command interpreter that drives a queue
//!
//! **No process concerns**: reading the environment, installing a tracing subscriber and
//! talking to a terminal belong in the `triage-run` and `triage` binaries.

pub mod command;
pub mod config;
pub mod constants;
mod error;
pub mod patient;
pub mod queue;
pub mod session;
pub mod severity;
pub mod snapshot;

pub use command::{Command, CommandError};
pub use config::TriageConfig;
pub use error::{TriageError, TriageResult};
pub use patient::{ArrivalOrder, Patient};
pub use queue::PatientQueue;
pub use session::{Flow, Session};
pub use severity::Severity;
pub use triage_types::{NonEmptyText, TextError};
