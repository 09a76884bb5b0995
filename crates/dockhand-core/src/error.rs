use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to resolve project directory {path}")]
    ProjectDirResolve {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Manifest ──
    #[error("failed to read manifest {path}")]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse manifest {path}")]
    ManifestParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write manifest {path}")]
    ManifestWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no \"version\" entry in manifest {path}")]
    ManifestVersionMissing { path: PathBuf },

    #[error("manifest {path} declares version {found:?}, expected {expected:?}")]
    ManifestVersionMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    // ── Versioning ──
    #[error("cannot bump invalid version {version:?}")]
    InvalidVersion {
        version: String,
        source: semver::Error,
    },

    #[error("cannot bump version {version:?}: a component is already at its maximum")]
    VersionOverflow { version: String },

    #[error("unknown bump level {level:?}; expected one of: major, minor, patch, prerelease")]
    InvalidBumpLevel { level: String },

    // ── Tasks ──
    #[error("unknown task '{name}'; available tasks: {}", available.join(", "))]
    UnknownTask {
        name: String,
        available: Vec<&'static str>,
    },

    #[error("invalid arguments for task '{task}': {reason}")]
    InvalidTaskArgs { task: String, reason: &'static str },
}
