use crate::manifest::Manifest;
use regex::Regex;
use std::sync::LazyLock;

/// Placeholder used when the manifest does not provide a name or version.
pub const UNKNOWN: &str = "__UNKNOWN__";

const CONTAINER_SUFFIX: &str = "-container";

static SCOPE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@[^/]*/").expect("scope prefix pattern is valid"));

/// Naming and tagging parameters derived from the manifest.
///
/// Computed once at process entry and passed by reference to every command
/// builder. `unscoped_name` and `docker_repo` strip the scope differently:
/// the former drops the whole `@scope/` segment (it is a display name), the
/// latter drops only the `@` sigil (it is a registry path).
///
/// **Invariant:** `docker_tag == format!("{docker_repo}:{version}")`.
///
/// # Examples
///
/// ```
/// use dockhand_core::ProjectParameters;
///
/// let params = ProjectParameters::new("@scope/foo-container", "1.2.3");
/// assert_eq!(params.unscoped_name, "foo");
/// assert_eq!(params.docker_repo, "scope/foo");
/// assert_eq!(params.docker_tag, "scope/foo:1.2.3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectParameters {
    /// Package name exactly as declared (or [`UNKNOWN`])
    pub raw_name: String,
    /// Package version exactly as declared (or [`UNKNOWN`])
    pub version: String,
    /// Name without `@scope/` and `-container`, passed as `APP_NAME`
    pub unscoped_name: String,
    /// Registry repository path, e.g. `scope/foo`
    pub docker_repo: String,
    /// Primary image reference, `<docker_repo>:<version>`
    pub docker_tag: String,
}

impl ProjectParameters {
    pub fn new(raw_name: &str, version: &str) -> Self {
        let docker_repo = docker_repo(raw_name);
        Self {
            raw_name: raw_name.to_owned(),
            version: version.to_owned(),
            unscoped_name: unscoped_name(raw_name),
            docker_tag: format!("{docker_repo}:{version}"),
            docker_repo,
        }
    }

    pub fn from_manifest(manifest: &Manifest) -> Self {
        let params = Self::new(
            manifest.name.as_deref().unwrap_or(UNKNOWN),
            manifest.version.as_deref().unwrap_or(UNKNOWN),
        );

        tracing::debug!(
            name = %params.raw_name,
            version = %params.version,
            tag = %params.docker_tag,
            "project parameters derived"
        );

        params
    }

    /// The image reference for an additional tag; an empty tag means the
    /// project version.
    pub fn tagged(&self, tag: &str) -> String {
        let tag = if tag.is_empty() { self.version.as_str() } else { tag };
        format!("{}:{tag}", self.docker_repo)
    }
}

/// `@scope/foo-container` → `foo`
pub fn unscoped_name(raw_name: &str) -> String {
    SCOPE_PREFIX
        .replace(raw_name, "")
        .replacen(CONTAINER_SUFFIX, "", 1)
}

/// `@scope/foo-container` → `scope/foo`
pub fn docker_repo(raw_name: &str) -> String {
    raw_name
        .strip_prefix('@')
        .unwrap_or(raw_name)
        .replacen(CONTAINER_SUFFIX, "", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_without_slash_is_kept_in_unscoped_name() {
        assert_eq!(unscoped_name("@loner"), "@loner");
        assert_eq!(docker_repo("@loner"), "loner");
    }

    #[test]
    fn only_first_container_occurrence_is_removed() {
        assert_eq!(unscoped_name("a-container-container"), "a-container");
        assert_eq!(docker_repo("a-container-container"), "a-container");
    }

    #[test]
    fn container_marker_removed_mid_name() {
        assert_eq!(unscoped_name("@org/api-container-v2"), "api-v2");
        assert_eq!(docker_repo("@org/api-container-v2"), "org/api-v2");
    }

    #[test]
    fn tagged_substitutes_version_for_empty_tag() {
        let params = ProjectParameters::new("@scope/foo", "1.2.3");
        assert_eq!(params.tagged(""), params.docker_tag);
        assert_eq!(params.tagged("edge"), "scope/foo:edge");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn package_name() -> impl Strategy<Value = String> {
            "(@[a-z0-9]{1,10}/)?[a-z][a-z0-9-]{0,20}(-container)?"
        }

        proptest! {
            #[test]
            fn docker_tag_is_repo_colon_version(
                name in package_name(),
                version in "[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}",
            ) {
                let params = ProjectParameters::new(&name, &version);
                prop_assert_eq!(
                    params.docker_tag,
                    format!("{}:{}", params.docker_repo, params.version)
                );
            }

            #[test]
            fn derived_names_never_start_with_sigil(name in package_name()) {
                prop_assert!(!docker_repo(&name).starts_with('@'));
                prop_assert!(!unscoped_name(&name).starts_with('@'));
            }

            #[test]
            fn unscoped_name_is_last_repo_segment(name in package_name()) {
                let repo = docker_repo(&name);
                let last = repo.rsplit('/').next().unwrap_or(&repo);
                prop_assert_eq!(unscoped_name(&name), last);
            }
        }
    }
}
