use crate::context::RunContext;
use crate::executor::{RealExecutor, ShellExecutor};
use crate::shell::ShellError;
use dockhand_build::format::{self, FormatError};
use dockhand_build::{DockerCommands, DockerError, GitError, HELP_TEXT, git};
use dockhand_core::{BumpLevel, Manifest, Task, UNKNOWN, manifest, version};
use std::io::Write;

/// One step of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Run a shell command
    Shell { label: &'static str, command: String },
    /// Print the usage document
    Help,
    /// Increment the manifest version and record the release in git
    Bump(BumpLevel),
}

/// Expands tasks into actions and runs them one at a time, in order.
///
/// The first failing action stops the whole run. Nothing is retried or
/// rolled back.
pub struct TaskRunner<E: ShellExecutor = RealExecutor> {
    executor: E,
    context: RunContext,
    dry_run: bool,
}

impl TaskRunner<RealExecutor> {
    pub fn new(context: RunContext) -> Self {
        Self::with_executor(RealExecutor, context)
    }
}

impl<E: ShellExecutor> TaskRunner<E> {
    pub fn with_executor(executor: E, context: RunContext) -> Self {
        Self {
            executor,
            context,
            dry_run: false,
        }
    }

    /// Leave the manifest untouched when bumping.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The actions `task` runs, in order.
    pub fn plan(&self, task: &Task) -> Result<Vec<Action>, RunError> {
        let ctx = &self.context;
        let context_dir = ctx.context_dir();
        let docker = DockerCommands::new(
            &ctx.config.docker,
            &ctx.params,
            &context_dir,
            ctx.build_timestamp,
        );

        let actions: Vec<Action> = match task {
            Task::Default | Task::Help => vec![Action::Help],
            Task::Format => {
                let files = format::source_files(&ctx.project_dir, &ctx.config.format)?;
                vec![Action::Shell {
                    label: "format",
                    command: format::render(&ctx.config.format, &files)?,
                }]
            }
            Task::Package => vec![Action::Shell {
                label: "docker build",
                command: docker.build()?,
            }],
            Task::Publish { tags } => std::iter::once(docker.publish().map(|command| {
                Action::Shell {
                    label: "docker push",
                    command,
                }
            }))
            .chain(tags.iter().map(|tag| {
                docker.tag_and_publish(tag).map(|command| Action::Shell {
                    label: "docker tag and push",
                    command,
                })
            }))
            .collect::<Result<Vec<_>, DockerError>>()?,
            Task::Bump(level) => vec![Action::Bump(*level)],
        };

        Ok(actions)
    }

    /// Run `tasks` in order. Help text and bump results go to `out`.
    pub async fn run<W: Write>(&self, tasks: &[Task], out: &mut W) -> Result<(), RunError> {
        for task in tasks {
            tracing::info!(task = task.name(), "running task");
            for action in self.plan(task)? {
                self.perform(task, action, out).await?;
            }
        }
        Ok(())
    }

    async fn perform<W: Write>(
        &self,
        task: &Task,
        action: Action,
        out: &mut W,
    ) -> Result<(), RunError> {
        match action {
            Action::Shell { label, command } => self.shell(task, label, &command).await,
            Action::Help => writeln!(out, "{HELP_TEXT}").map_err(|e| RunError::Output { source: e }),
            Action::Bump(level) => self.bump(task, level, out).await,
        }
    }

    async fn shell(&self, task: &Task, label: &'static str, command: &str) -> Result<(), RunError> {
        tracing::info!(step = label, %command, "executing");
        self.executor
            .run(command, &self.context.project_dir)
            .await
            .map_err(|e| RunError::Step {
                task: task.name(),
                label,
                source: e,
            })
    }

    async fn bump<W: Write>(
        &self,
        task: &Task,
        level: BumpLevel,
        out: &mut W,
    ) -> Result<(), RunError> {
        let ctx = &self.context;
        let current = Manifest::load(&ctx.manifest_path)?
            .version
            .unwrap_or_else(|| UNKNOWN.to_owned());
        let next = version::increment(&current, level, &ctx.config.bump.prerelease_name)?;

        if self.dry_run {
            tracing::info!(from = %current, to = %next, "dry run; manifest not rewritten");
        } else {
            manifest::write_version(&ctx.manifest_path, &current, &next)?;
        }
        writeln!(out, "Bumped version: {current} -> {next}")
            .map_err(|e| RunError::Output { source: e })?;

        for command in git::release_commands(&ctx.config.bump, &ctx.manifest_display(), &next)? {
            self.shell(task, "git", &command).await?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Core(#[from] dockhand_core::Error),

    #[error("failed to prepare the format command")]
    Format {
        #[from]
        source: FormatError,
    },

    #[error("failed to prepare a docker command")]
    Docker {
        #[from]
        source: DockerError,
    },

    #[error("failed to prepare the git release commands")]
    Git {
        #[from]
        source: GitError,
    },

    #[error("task '{task}' failed at step '{label}'")]
    Step {
        task: &'static str,
        label: &'static str,
        source: ShellError,
    },

    #[error("failed to write output")]
    Output { source: std::io::Error },
}
