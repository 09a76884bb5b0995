use serde::{Deserialize, Serialize};

/// File name of the optional per-project configuration.
pub const CONFIG_FILE: &str = "dockhand.toml";

/// dockhand.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DockhandConfig {
    #[serde(default)]
    pub docker: DockerConfig,
    #[serde(default)]
    pub format: FormatConfig,
    #[serde(default)]
    pub bump: BumpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DockerConfig {
    /// Container engine CLI
    #[serde(default = "default_docker_binary")]
    pub binary: String,
    /// Build context, relative to the project directory
    #[serde(default = "default_context")]
    pub context: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Formatter invocation; file names are appended
    #[serde(default = "default_format_command")]
    pub command: String,
    /// Files always passed to the formatter
    #[serde(default = "default_format_files")]
    pub files: Vec<String>,
    /// Directory scanned recursively for source files
    #[serde(default = "default_source_dir")]
    pub source_dir: String,
    /// Extension (without the dot) of source files to format
    #[serde(default = "default_extension")]
    pub extension: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BumpConfig {
    /// Manifest holding the name and version, relative to the project directory
    #[serde(default = "default_manifest")]
    pub manifest: String,
    /// Identifier used for prerelease bumps (`1.2.4-rc.0`)
    #[serde(default = "default_prerelease_name")]
    pub prerelease_name: String,
    /// Commit the manifest after bumping
    #[serde(default = "default_true")]
    pub commit: bool,
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
    /// Create an annotated tag for the new version
    #[serde(default = "default_true")]
    pub create_tag: bool,
    #[serde(default = "default_tag_name")]
    pub tag_name: String,
    #[serde(default = "default_tag_message")]
    pub tag_message: String,
    /// Push the commit and tags to the remote
    #[serde(default)]
    pub push: bool,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            binary: default_docker_binary(),
            context: default_context(),
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            command: default_format_command(),
            files: default_format_files(),
            source_dir: default_source_dir(),
            extension: default_extension(),
        }
    }
}

impl Default for BumpConfig {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            prerelease_name: default_prerelease_name(),
            commit: true,
            commit_message: default_commit_message(),
            create_tag: true,
            tag_name: default_tag_name(),
            tag_message: default_tag_message(),
            push: false,
        }
    }
}

impl DockhandConfig {
    /// Load from dockhand.toml at the given path, or return defaults if not found.
    pub fn load(project_dir: &std::path::Path) -> crate::Result<Self> {
        let config_path = project_dir.join(CONFIG_FILE);
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })
        } else {
            tracing::debug!(path = %config_path.display(), "no config file; using defaults");
            Ok(Self::default())
        }
    }
}

fn default_docker_binary() -> String {
    "docker".to_owned()
}

fn default_context() -> String {
    ".".to_owned()
}

fn default_format_command() -> String {
    "npx prettier --write".to_owned()
}

fn default_format_files() -> Vec<String> {
    vec!["README.md".to_owned()]
}

fn default_source_dir() -> String {
    "src".to_owned()
}

fn default_extension() -> String {
    "ts".to_owned()
}

fn default_manifest() -> String {
    "package.json".to_owned()
}

fn default_prerelease_name() -> String {
    "rc".to_owned()
}

fn default_true() -> bool {
    true
}

fn default_commit_message() -> String {
    "Release v%VERSION%".to_owned()
}

fn default_tag_name() -> String {
    "v%VERSION%".to_owned()
}

fn default_tag_message() -> String {
    "Version %VERSION%".to_owned()
}
