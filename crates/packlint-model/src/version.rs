use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ModelError;

/// Dotted-integer content version (`major.minor.patch`).
///
/// Ordering is the usual semantic ordering: compare majors, then minors,
/// then patches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

/// The lowest platform version new content items are allowed to target.
pub const MINIMUM_PLATFORM_VERSION: ContentVersion = ContentVersion::new(6, 0, 0);

impl ContentVersion {
    /// The version every pack starts its life at.
    pub const INITIAL: ContentVersion = ContentVersion::new(1, 0, 0);

    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl FromStr for ContentVersion {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidVersion {
            value: s.to_string(),
        };
        let mut parts = s.trim().split('.');
        let major = parse_part(parts.next()).ok_or_else(invalid)?;
        let minor = parse_part(parts.next()).ok_or_else(invalid)?;
        let patch = parse_part(parts.next()).ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self::new(major, minor, patch))
    }
}

fn parse_part(part: Option<&str>) -> Option<u32> {
    let part = part?;
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl fmt::Display for ContentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Serialize for ContentVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContentVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}
