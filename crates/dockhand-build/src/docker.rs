use dockhand_core::{DockerConfig, ProjectParameters};
use std::borrow::Cow;
use std::path::Path;

/// Renders the container engine invocations for packaging and publishing.
///
/// The build timestamp is fixed when the builder is created, so every
/// `build()` rendered from the same instance carries the same value.
pub struct DockerCommands<'a> {
    config: &'a DockerConfig,
    params: &'a ProjectParameters,
    context_dir: &'a Path,
    build_timestamp: i64,
}

impl<'a> DockerCommands<'a> {
    pub fn new(
        config: &'a DockerConfig,
        params: &'a ProjectParameters,
        context_dir: &'a Path,
        build_timestamp: i64,
    ) -> Self {
        Self {
            config,
            params,
            context_dir,
            build_timestamp,
        }
    }

    /// `docker build --rm --tag <repo>:<version> <context> --build-arg ...`
    pub fn build(&self) -> Result<String, DockerError> {
        let context = self.context_dir.display().to_string();
        Ok(format!(
            "{docker} build --rm --tag {tag} {context} \
             --build-arg APP_NAME={name} \
             --build-arg APP_VERSION={version} \
             --build-arg BUILD_TIMESTAMP={timestamp}",
            docker = self.config.binary,
            tag = quote(&self.params.docker_tag)?,
            context = quote(&context)?,
            name = quote(&self.params.unscoped_name)?,
            version = quote(&self.params.version)?,
            timestamp = self.build_timestamp,
        ))
    }

    /// `docker push <repo>:<version>`
    pub fn publish(&self) -> Result<String, DockerError> {
        Ok(format!(
            "{docker} push {tag}",
            docker = self.config.binary,
            tag = quote(&self.params.docker_tag)?,
        ))
    }

    /// Re-tag the built image and push it. An empty `tag` means the version.
    pub fn tag_and_publish(&self, tag: &str) -> Result<String, DockerError> {
        let target = self.params.tagged(tag);
        Ok(format!(
            "{docker} tag {source} {target} && {docker} push {target}",
            docker = self.config.binary,
            source = quote(&self.params.docker_tag)?,
            target = quote(&target)?,
        ))
    }
}

fn quote(value: &str) -> Result<Cow<'_, str>, DockerError> {
    shlex::try_quote(value).map_err(|e| DockerError::Quote {
        value: value.to_owned(),
        source: e,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum DockerError {
    #[error("cannot pass {value:?} to the container engine")]
    Quote {
        value: String,
        source: shlex::QuoteError,
    },
}
