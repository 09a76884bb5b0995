use crate::shell::ShellError;
use std::path::Path;

/// Abstraction over shell command execution for testability.
///
/// Production code uses [`RealExecutor`] (or [`DryRunExecutor`] for
/// `--dry-run`), tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait ShellExecutor: Send + Sync {
    /// Run `command` through `sh -c` in `dir`, streaming output to the terminal.
    async fn run(&self, command: &str, dir: &Path) -> Result<(), ShellError>;
}

/// Runs commands with `sh -c`, inheriting stdio.
pub struct RealExecutor;

impl ShellExecutor for RealExecutor {
    async fn run(&self, command: &str, dir: &Path) -> Result<(), ShellError> {
        use std::process::Stdio;

        let status = tokio::process::Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| ShellError::Spawn {
                command: command.to_owned(),
                source: e,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ShellError::CommandFailed {
                command: command.to_owned(),
                status: status.to_string(),
            })
        }
    }
}

/// Prints each command instead of running it.
pub struct DryRunExecutor;

impl ShellExecutor for DryRunExecutor {
    async fn run(&self, command: &str, _dir: &Path) -> Result<(), ShellError> {
        println!("[dry-run] {command}");
        Ok(())
    }
}
