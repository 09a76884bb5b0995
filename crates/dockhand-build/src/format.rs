use dockhand_core::FormatConfig;
use std::path::{Path, PathBuf};

/// Collect the files handed to the formatter.
///
/// Static files from `[format].files` come first (skipped when absent),
/// followed by every `<source_dir>/**/*.<extension>` match in sorted order.
/// Paths are relative to `project_dir`.
pub fn source_files(project_dir: &Path, config: &FormatConfig) -> Result<Vec<String>, FormatError> {
    let mut files: Vec<String> = config
        .files
        .iter()
        .filter(|f| project_dir.join(f).is_file())
        .cloned()
        .collect();

    let pattern = format!(
        "{}/{}/**/*.{}",
        glob::Pattern::escape(&project_dir.display().to_string()),
        config.source_dir.trim_end_matches('/'),
        config.extension.trim_start_matches('.'),
    );
    tracing::debug!(%pattern, "scanning for source files");

    let entries = glob::glob(&pattern).map_err(|e| FormatError::Pattern {
        pattern: pattern.clone(),
        source: e,
    })?;

    let mut sources = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| FormatError::Walk { source: e })?;
        if path.is_file() {
            sources.push(relative(project_dir, &path));
        }
    }
    sources.sort();

    for source in sources {
        if !files.contains(&source) {
            files.push(source);
        }
    }

    if files.is_empty() {
        return Err(FormatError::NoFiles {
            dir: project_dir.join(&config.source_dir),
            extension: config.extension.clone(),
        });
    }

    Ok(files)
}

/// `<command> <file>...`
///
/// `command` is a shell fragment and goes in verbatim; each file is quoted.
pub fn render(config: &FormatConfig, files: &[String]) -> Result<String, FormatError> {
    if files.is_empty() {
        return Ok(config.command.clone());
    }
    let files = shlex::try_join(files.iter().map(String::as_str))
        .map_err(|e| FormatError::Quote { source: e })?;
    Ok(format!("{} {files}", config.command))
}

fn relative(project_dir: &Path, path: &Path) -> String {
    path.strip_prefix(project_dir)
        // arch-lint: allow(no-silent-result-drop) reason="glob results outside the project dir are shown as-is"
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("invalid source pattern {pattern:?}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("failed to scan source files")]
    Walk { source: glob::GlobError },

    #[error("nothing to format: no static files present and no *.{extension} files under {dir}")]
    NoFiles { dir: PathBuf, extension: String },

    #[error("cannot pass a file name to the formatter")]
    Quote { source: shlex::QuoteError },
}
