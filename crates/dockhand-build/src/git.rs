use dockhand_core::BumpConfig;
use std::borrow::Cow;

const VERSION_PLACEHOLDER: &str = "%VERSION%";

/// Git commands that record a version bump, in execution order.
///
/// Depending on `[bump]`: commit the manifest, create an annotated tag, and
/// push both. An empty list means nothing is recorded.
pub fn release_commands(
    config: &BumpConfig,
    manifest: &str,
    version: &str,
) -> Result<Vec<String>, GitError> {
    let mut commands = Vec::new();

    if config.commit {
        commands.push(format!(
            "git commit {manifest} -m {message}",
            manifest = quote(manifest)?,
            message = quote(&substitute(&config.commit_message, version))?,
        ));
    }

    if config.create_tag {
        commands.push(format!(
            "git tag -a {tag} -m {message}",
            tag = quote(&substitute(&config.tag_name, version))?,
            message = quote(&substitute(&config.tag_message, version))?,
        ));
    }

    if config.push {
        commands.push("git push && git push --tags".to_owned());
    }

    Ok(commands)
}

fn substitute(template: &str, version: &str) -> String {
    template.replace(VERSION_PLACEHOLDER, version)
}

fn quote(value: &str) -> Result<Cow<'_, str>, GitError> {
    shlex::try_quote(value).map_err(|e| GitError::Quote {
        value: value.to_owned(),
        source: e,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("cannot pass {value:?} to git")]
    Quote {
        value: String,
        source: shlex::QuoteError,
    },
}
