#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("failed to start `sh` for: {command}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("command failed ({status}): {command}")]
    CommandFailed { command: String, status: String },
}
