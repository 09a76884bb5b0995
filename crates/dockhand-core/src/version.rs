//! Semantic version increments with npm semantics.
//!
//! Releasing a prerelease never skips a version: `1.3.0-rc.2` bumped by
//! `minor` becomes `1.3.0`, not `1.4.0`.

use semver::{BuildMetadata, Prerelease, Version};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BumpLevel {
    #[default]
    Patch,
    Minor,
    Major,
    Prerelease,
}

impl BumpLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
            Self::Prerelease => "prerelease",
        }
    }
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpLevel {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patch" => Ok(Self::Patch),
            "minor" => Ok(Self::Minor),
            "major" => Ok(Self::Major),
            "prerelease" => Ok(Self::Prerelease),
            other => Err(crate::Error::InvalidBumpLevel {
                level: other.to_owned(),
            }),
        }
    }
}

/// Compute the next version after `version` at the given level.
///
/// # Errors
///
/// - [`Error::InvalidVersion`](crate::Error::InvalidVersion) if `version` is not
///   valid semver (this includes the `__UNKNOWN__` placeholder)
/// - [`Error::VersionOverflow`](crate::Error::VersionOverflow) if a component or
///   the prerelease counter is already `u64::MAX`
///
/// # Examples
///
/// ```
/// use dockhand_core::version::{increment, BumpLevel};
///
/// assert_eq!(increment("1.2.3", BumpLevel::Minor, "rc").unwrap(), "1.3.0");
/// assert_eq!(increment("1.2.3", BumpLevel::Prerelease, "rc").unwrap(), "1.2.4-rc.0");
/// ```
pub fn increment(version: &str, level: BumpLevel, prerelease_name: &str) -> crate::Result<String> {
    let current = Version::parse(version).map_err(|e| crate::Error::InvalidVersion {
        version: version.to_owned(),
        source: e,
    })?;

    let bumped = |n: u64| {
        n.checked_add(1).ok_or_else(|| crate::Error::VersionOverflow {
            version: version.to_owned(),
        })
    };

    let mut next = current.clone();
    next.build = BuildMetadata::EMPTY;
    let is_pre = !current.pre.is_empty();

    match level {
        BumpLevel::Major => {
            if !(is_pre && current.minor == 0 && current.patch == 0) {
                next.major = bumped(next.major)?;
            }
            next.minor = 0;
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        BumpLevel::Minor => {
            if !(is_pre && current.patch == 0) {
                next.minor = bumped(next.minor)?;
            }
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        BumpLevel::Patch => {
            if !is_pre {
                next.patch = bumped(next.patch)?;
            }
            next.pre = Prerelease::EMPTY;
        }
        BumpLevel::Prerelease => {
            let pre = if is_pre {
                next_prerelease(current.pre.as_str(), prerelease_name).ok_or_else(|| {
                    crate::Error::VersionOverflow {
                        version: version.to_owned(),
                    }
                })?
            } else {
                next.patch = bumped(next.patch)?;
                first_prerelease(prerelease_name)
            };
            next.pre = Prerelease::new(&pre).map_err(|e| crate::Error::InvalidVersion {
                version: format!("{}.{}.{}-{pre}", next.major, next.minor, next.patch),
                source: e,
            })?;
        }
    }

    tracing::debug!(from = %current, to = %next, %level, "version incremented");
    Ok(next.to_string())
}

fn first_prerelease(name: &str) -> String {
    if name.is_empty() {
        "0".to_owned()
    } else {
        format!("{name}.0")
    }
}

/// `None` when the counter cannot advance.
fn next_prerelease(current: &str, name: &str) -> Option<String> {
    let mut parts: Vec<String> = current.split('.').map(str::to_owned).collect();

    if !name.is_empty() && parts.first().map(String::as_str) != Some(name) {
        return Some(first_prerelease(name));
    }

    // arch-lint: allow(no-silent-result-drop) reason="a non-numeric last identifier means there is no counter yet"
    match parts.last().and_then(|p| p.parse::<u64>().ok()) {
        Some(n) => {
            if let Some(last) = parts.last_mut() {
                *last = n.checked_add(1)?.to_string();
            }
        }
        None => parts.push("0".to_owned()),
    }
    Some(parts.join("."))
}
