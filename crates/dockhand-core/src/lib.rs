//! Core types and configuration for dockhand.
//!
//! This crate defines the `dockhand.toml` schema ([`DockhandConfig`]),
//! manifest access ([`Manifest`]), the derived naming parameters
//! ([`ProjectParameters`]), version increments, task names, and shared error
//! types.

pub mod config;
pub mod error;
pub mod manifest;
pub mod project;
pub mod task;
pub mod version;

pub use config::{BumpConfig, CONFIG_FILE, DockerConfig, DockhandConfig, FormatConfig};
pub use error::{Error, Result};
pub use manifest::Manifest;
pub use project::{ProjectParameters, UNKNOWN};
pub use task::Task;
pub use version::BumpLevel;
