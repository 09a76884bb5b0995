//! Task names accepted on the command line.
//!
//! Invocations use the colon syntax `name[:arg][:arg]...`, e.g.
//! `publish:edge:latest` or `bump:minor`.

use crate::version::BumpLevel;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Runs when no task is named; same as [`Task::Help`]
    Default,
    Help,
    Format,
    Package,
    /// Push the primary tag, then tag and push each extra tag in order
    Publish { tags: Vec<String> },
    Bump(BumpLevel),
}

impl Task {
    /// Every registered task name.
    pub const NAMES: [&'static str; 6] = ["default", "help", "format", "package", "publish", "bump"];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Help => "help",
            Self::Format => "format",
            Self::Package => "package",
            Self::Publish { .. } => "publish",
            Self::Bump(_) => "bump",
        }
    }

    /// Parse a list of invocations, failing on the first bad one.
    /// An empty list means the default task.
    pub fn parse_all<S: AsRef<str>>(invocations: &[S]) -> crate::Result<Vec<Self>> {
        if invocations.is_empty() {
            return Ok(vec![Self::Default]);
        }
        invocations.iter().map(|s| s.as_ref().parse()).collect()
    }
}

impl FromStr for Task {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.split(':');
        let name = segments.next().unwrap_or_default();
        let args: Vec<&str> = segments.collect();

        let no_args = |task: Task| {
            if args.is_empty() {
                Ok(task)
            } else {
                Err(crate::Error::InvalidTaskArgs {
                    task: name.to_owned(),
                    reason: "this task takes no arguments",
                })
            }
        };

        match name {
            "default" => no_args(Self::Default),
            "help" => no_args(Self::Help),
            "format" => no_args(Self::Format),
            "package" => no_args(Self::Package),
            "publish" => Ok(Self::Publish {
                tags: args.iter().map(|t| (*t).to_owned()).collect(),
            }),
            "bump" => match args.as_slice() {
                [] => Ok(Self::Bump(BumpLevel::default())),
                [level] => Ok(Self::Bump(level.parse()?)),
                _ => Err(crate::Error::InvalidTaskArgs {
                    task: name.to_owned(),
                    reason: "expected at most one bump level",
                }),
            },
            other => Err(crate::Error::UnknownTask {
                name: other.to_owned(),
                available: Self::NAMES.to_vec(),
            }),
        }
    }
}
