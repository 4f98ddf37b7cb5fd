use std::fmt;
use std::str::FromStr;

use crate::domain::DomainError;

/// A Go toolchain version such as `1.23` or `1.22.5`.
///
/// Only `MAJOR.MINOR[.PATCH]` with decimal components is accepted; the
/// original text is kept verbatim so it renders exactly as supplied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToolchainVersion(String);

impl ToolchainVersion {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ToolchainVersion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let invalid = |reason: &str| DomainError::InvalidToolchainVersion {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = value.split('.').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(invalid("expected MAJOR.MINOR or MAJOR.MINOR.PATCH"));
        }
        if parts
            .iter()
            .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
        {
            return Err(invalid("components must be decimal numbers"));
        }

        Ok(Self(value.to_string()))
    }
}

impl fmt::Display for ToolchainVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
