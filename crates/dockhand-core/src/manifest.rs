//! `package.json` access.
//!
//! Only two fields matter: `name` and `version`. Reading is lenient (a field
//! that is missing, empty, or not a string counts as absent). Writing touches
//! the top-level version entry alone so the rest of the file stays byte-for-byte intact.

use regex::Regex;
use serde_json::Value;
use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

static VERSION_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"("version"\s*:\s*")([^"]*)(")"#).expect("version entry pattern is valid")
});

/// Name and version as declared in the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub name: Option<String>,
    pub version: Option<String>,
}

impl Manifest {
    /// Read and parse the manifest at `path`.
    ///
    /// # Errors
    ///
    /// - [`Error::ManifestRead`](crate::Error::ManifestRead) if the file cannot be read
    /// - [`Error::ManifestParse`](crate::Error::ManifestParse) if it is not valid JSON
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| crate::Error::ManifestRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let value: Value =
            serde_json::from_str(&content).map_err(|e| crate::Error::ManifestParse {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(Self::from_value(&value))
    }

    /// Like [`Manifest::load`], but a missing or broken manifest yields an
    /// empty one so that derived parameters fall back to placeholders.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(manifest) => manifest,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "manifest unavailable; using placeholder name and version"
                );
                Self::default()
            }
        }
    }

    pub fn from_value(value: &Value) -> Self {
        Self {
            name: string_field(value, "name"),
            version: string_field(value, "version"),
        }
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Rewrite the top-level `"version"` entry of the manifest at `path` from
/// `current` to `new_version`.
///
/// Nested `version` keys (under `config`, `engines`, dependency blocks) are
/// never touched.
///
/// # Errors
///
/// - [`Error::ManifestVersionMissing`](crate::Error::ManifestVersionMissing) if there is no
///   top-level string `version`
/// - [`Error::ManifestVersionMismatch`](crate::Error::ManifestVersionMismatch) if it is not
///   `current`
/// - read, parse, and write errors with the manifest path
pub fn write_version(path: &Path, current: &str, new_version: &str) -> crate::Result<()> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::Error::ManifestRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let declared = Manifest::from_value(&serde_json::from_str(&content).map_err(|e| {
        crate::Error::ManifestParse {
            path: path.to_path_buf(),
            source: e,
        }
    })?)
    .version;

    let missing = || crate::Error::ManifestVersionMissing {
        path: path.to_path_buf(),
    };
    let declared = declared.ok_or_else(missing)?;
    if declared != current {
        return Err(crate::Error::ManifestVersionMismatch {
            path: path.to_path_buf(),
            expected: current.to_owned(),
            found: declared,
        });
    }

    let span = top_level_version(&content).ok_or_else(missing)?;
    if &content[span.clone()] != current {
        return Err(crate::Error::ManifestVersionMismatch {
            path: path.to_path_buf(),
            expected: current.to_owned(),
            found: content[span].to_owned(),
        });
    }

    let mut updated = String::with_capacity(content.len() + new_version.len());
    updated.push_str(&content[..span.start]);
    updated.push_str(new_version);
    updated.push_str(&content[span.end..]);

    std::fs::write(path, updated).map_err(|e| crate::Error::ManifestWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(
        path = %path.display(),
        from = %current,
        to = %new_version,
        "manifest version rewritten"
    );

    Ok(())
}

/// Byte range of the value of the first `"version"` entry that sits
/// directly in the root object.
fn top_level_version(content: &str) -> Option<Range<usize>> {
    VERSION_ENTRY
        .captures_iter(content)
        .filter(|caps| caps.get(0).and_then(|m| depth_at(content, m.start())) == Some(1))
        .find_map(|caps| caps.get(2))
        .map(|m| m.range())
}

/// Object/array nesting depth at `offset`, or `None` inside a string literal.
fn depth_at(content: &str, offset: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in content.bytes().enumerate() {
        if i == offset {
            return (!in_string).then_some(depth);
        }
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}
