use dockhand_core::{DockhandConfig, Manifest, ProjectParameters};
use std::path::{Path, PathBuf};

/// Everything a run needs, resolved once at process entry and read-only
/// afterwards.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Absolute project directory; commands run here
    pub project_dir: PathBuf,
    /// Absolute path of the manifest
    pub manifest_path: PathBuf,
    pub config: DockhandConfig,
    pub params: ProjectParameters,
    /// Milliseconds since the Unix epoch (UTC), passed as `BUILD_TIMESTAMP`
    pub build_timestamp: i64,
}

impl RunContext {
    /// Resolve the project directory, load `dockhand.toml`, and derive the
    /// project parameters from the manifest.
    ///
    /// `manifest` overrides `[bump].manifest`; relative paths are resolved
    /// against the project directory. A missing or unreadable manifest is
    /// not an error here: the parameters fall back to placeholders.
    ///
    /// # Errors
    ///
    /// - [`Error::ProjectDirResolve`](dockhand_core::Error::ProjectDirResolve) if `project_dir` does not exist
    /// - config load/parse errors from [`DockhandConfig::load`]
    pub fn load(project_dir: &Path, manifest: Option<&Path>) -> dockhand_core::Result<Self> {
        let project_dir =
            project_dir
                .canonicalize()
                .map_err(|e| dockhand_core::Error::ProjectDirResolve {
                    path: project_dir.to_path_buf(),
                    source: e,
                })?;

        let config = DockhandConfig::load(&project_dir)?;
        let manifest_path =
            project_dir.join(manifest.unwrap_or_else(|| Path::new(&config.bump.manifest)));
        let params = ProjectParameters::from_manifest(&Manifest::load_or_default(&manifest_path));

        Ok(Self {
            project_dir,
            manifest_path,
            config,
            params,
            build_timestamp: chrono::Utc::now().timestamp_millis(),
        })
    }

    /// The docker build context: `[docker].context` under the project directory.
    pub fn context_dir(&self) -> PathBuf {
        self.project_dir
            .join(&self.config.docker.context)
            .components()
            .collect()
    }

    /// Manifest path as shown to git, relative to the project directory when possible.
    pub fn manifest_display(&self) -> String {
        self.manifest_path
            .strip_prefix(&self.project_dir)
            // arch-lint: allow(no-silent-result-drop) reason="a manifest outside the project dir is committed by absolute path"
            .unwrap_or(&self.manifest_path)
            .display()
            .to_string()
    }
}
