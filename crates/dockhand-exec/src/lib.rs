//! Shell execution and task sequencing for dockhand.
//!
//! [`TaskRunner`] expands each [`Task`](dockhand_core::Task) into
//! [`Action`]s and runs them strictly one after another through a
//! [`ShellExecutor`].

pub mod context;
pub mod executor;
pub mod runner;
pub mod shell;

pub use context::RunContext;
pub use executor::{DryRunExecutor, RealExecutor, ShellExecutor};
pub use runner::{Action, RunError, TaskRunner};
pub use shell::ShellError;
