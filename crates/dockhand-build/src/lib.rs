//! Shell command builders for dockhand.
//!
//! # Tasks
//!
//! ```text
//! dockhand format    ── <formatter> README.md src/**/*.ts
//! dockhand package   ── docker build --rm --tag <repo>:<version> <context> --build-arg ...
//! dockhand publish   ── docker push <repo>:<version>
//!   :<tag>...        ── docker tag <repo>:<version> <repo>:<tag> && docker push <repo>:<tag>
//! dockhand bump      ── rewrite manifest version, then git commit / git tag
//! ```
//!
//! Builders only render command strings; running them is the job of
//! `dockhand-exec`.

pub mod docker;
pub mod format;
pub mod git;
pub mod help;

pub use docker::{DockerCommands, DockerError};
pub use git::GitError;
pub use help::HELP_TEXT;
