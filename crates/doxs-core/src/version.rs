//! Semantic versions for the record schema

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Semantic version of a record schema
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub pre_release: Option<String>,
    pub build_metadata: Option<String>,
}

/// Version parsing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Invalid version format: {0}")]
    InvalidFormat(String),
}

impl SchemaVersion {
    /// Create a new release version
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            pre_release: None,
            build_metadata: None,
        }
    }

    /// Parse a version string such as `1.0.0`, `v2.1.0-rc.1` or `1.0.0+abc`
    pub fn parse(version_str: &str) -> Result<Self, VersionError> {
        let trimmed = version_str.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);

        let (version_part, build_metadata) = match trimmed.split_once('+') {
            Some((head, build)) => (head, Some(build.to_string())),
            None => (trimmed, None),
        };

        let (version_part, pre_release) = match version_part.split_once('-') {
            Some((head, pre)) => (head, Some(pre.to_string())),
            None => (version_part, None),
        };

        let parts: Vec<&str> = version_part.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionError::InvalidFormat(format!(
                "Expected format X.Y.Z, got: {}",
                version_str
            )));
        }

        let number = |label: &str, raw: &str| -> Result<u32, VersionError> {
            raw.parse().map_err(|_| {
                VersionError::InvalidFormat(format!("Invalid {} version: {}", label, raw))
            })
        };

        Ok(Self {
            major: number("major", parts[0])?,
            minor: number("minor", parts[1])?,
            patch: number("patch", parts[2])?,
            pre_release,
            build_metadata,
        })
    }

    /// Check if this is a pre-release version
    pub fn is_pre_release(&self) -> bool {
        self.pre_release.is_some()
    }

    /// Whether records accepted under `other` are valid input under `self`.
    ///
    /// Major versions must match; while the major version is 0 the minor
    /// version must match as well.
    pub fn is_compatible_with(&self, other: &SchemaVersion) -> bool {
        if self.major != other.major {
            return false;
        }
        self.major != 0 || self.minor == other.minor
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(ref pre) = self.pre_release {
            write!(f, "-{}", pre)?;
        }
        if let Some(ref build) = self.build_metadata {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

impl FromStr for SchemaVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialOrd for SchemaVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SchemaVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| match (&self.pre_release, &other.pre_release) {
                // Pre-release versions have lower precedence
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
            // Build metadata only breaks ties, keeping `cmp` consistent with `==`
            .then_with(|| self.build_metadata.cmp(&other.build_metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parsing() {
        let v = SchemaVersion::parse("1.2.3").unwrap();
        assert_eq!(v, SchemaVersion::new(1, 2, 3));

        let v = SchemaVersion::parse("v2.0.0-alpha").unwrap();
        assert_eq!(v.major, 2);
        assert_eq!(v.pre_release, Some("alpha".to_string()));
        assert!(v.is_pre_release());

        let v = SchemaVersion::parse("3.1.4-beta.2+exp.sha.5114f85").unwrap();
        assert_eq!(v.pre_release, Some("beta.2".to_string()));
        assert_eq!(v.build_metadata, Some("exp.sha.5114f85".to_string()));
        assert_eq!(v.to_string(), "3.1.4-beta.2+exp.sha.5114f85");
    }

    #[test]
    fn test_invalid_versions() {
        assert!(SchemaVersion::parse("1.0").is_err());
        assert!(SchemaVersion::parse("one.two.three").is_err());
        assert!("".parse::<SchemaVersion>().is_err());
    }

    #[test]
    fn test_version_ordering() {
        let v1 = SchemaVersion::new(1, 0, 0);
        let v1_rc = SchemaVersion::parse("1.0.0-rc.1").unwrap();
        let v1_1 = SchemaVersion::new(1, 1, 0);

        assert!(v1_rc < v1);
        assert!(v1 < v1_1);
    }

    #[test]
    fn test_build_metadata_ordering_matches_equality() {
        let a = SchemaVersion::parse("1.0.0+a").unwrap();
        let b = SchemaVersion::parse("1.0.0+b").unwrap();
        let plain = SchemaVersion::new(1, 0, 0);

        assert_ne!(a, b);
        assert_ne!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a.cmp(&a.clone()), Ordering::Equal);
        assert!(plain < a);
        assert!(a < SchemaVersion::new(1, 0, 1));
        assert!(a.is_compatible_with(&b));
    }

    #[test]
    fn test_compatibility() {
        let v1 = SchemaVersion::new(1, 0, 0);
        assert!(SchemaVersion::new(1, 4, 2).is_compatible_with(&v1));
        assert!(!SchemaVersion::new(2, 0, 0).is_compatible_with(&v1));

        let v0_1 = SchemaVersion::new(0, 1, 0);
        assert!(SchemaVersion::new(0, 1, 7).is_compatible_with(&v0_1));
        assert!(!SchemaVersion::new(0, 2, 0).is_compatible_with(&v0_1));
    }
}
