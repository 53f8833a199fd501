//! core::types
//!
//! Strong types for the values that cross the provider boundary.
//!
//! # Types
//!
//! - [`BranchName`] - Git branch short name, checked against refname rules
//! - [`Oid`] - Git object identifier (SHA-1 or SHA-256 hex)
//!
//! The facade itself forwards branch names to the provider as plain strings;
//! these types are where a provider decides whether a name is acceptable.
//!
//! # Examples
//!
//! ```
//! use nostr_git::core::types::{BranchName, Oid};
//!
//! let branch = BranchName::new("feature/announce").unwrap();
//! assert_eq!(branch.as_str(), "feature/announce");
//!
//! assert!(BranchName::new("bad..name").is_err());
//! assert!(Oid::new("not-a-sha").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid branch name '{name}': {reason}")]
    InvalidBranchName { name: String, reason: &'static str },

    #[error("invalid object id: {0}")]
    InvalidOid(String),
}

/// Substrings git refuses anywhere in a ref name.
const FORBIDDEN_SEQUENCES: [&str; 3] = ["..", "@{", "//"];

/// Characters git refuses anywhere in a ref name.
const FORBIDDEN_CHARS: [char; 8] = [' ', '~', '^', ':', '\\', '?', '*', '['];

/// A validated Git branch short name (without `refs/heads/`).
///
/// Follows `git check-ref-format --branch`:
/// no empty name, no `@`, no leading `-`, no leading or trailing `/`, no
/// trailing `.`, no `..`/`@{`/`//`, none of
/// `` ~^:\?*[`` or spaces or control characters, and no path component
/// that starts with `.` or ends with `.lock`.
///
/// ```
/// use nostr_git::core::types::BranchName;
///
/// assert!(BranchName::new("main").is_ok());
/// assert!(BranchName::new("user@feature").is_ok());
/// assert!(BranchName::new("has space").is_err());
/// assert!(BranchName::new("@").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    /// Create a validated branch name.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::InvalidBranchName`] naming the first rule the
    /// name breaks.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        match Self::violation(&name) {
            Some(reason) => Err(TypeError::InvalidBranchName { name, reason }),
            None => Ok(Self(name)),
        }
    }

    fn violation(name: &str) -> Option<&'static str> {
        if name.is_empty() {
            return Some("name is empty");
        }
        if name == "@" {
            return Some("'@' is reserved");
        }
        if name.starts_with('-') {
            return Some("name starts with '-'");
        }
        if name.starts_with('/') || name.ends_with('/') {
            return Some("name starts or ends with '/'");
        }
        if name.ends_with('.') {
            return Some("name ends with '.'");
        }
        if FORBIDDEN_SEQUENCES.iter().any(|seq| name.contains(seq)) {
            return Some("name contains '..', '@{' or '//'");
        }
        if name
            .chars()
            .any(|c| c.is_ascii_control() || FORBIDDEN_CHARS.contains(&c))
        {
            return Some("name contains a forbidden character");
        }
        let bad_component = name
            .split('/')
            .any(|part| part.starts_with('.') || part.ends_with(".lock"));
        if bad_component {
            return Some("a component starts with '.' or ends with '.lock'");
        }
        None
    }

    /// The branch name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The fully qualified ref, e.g. `refs/heads/main`.
    pub fn to_ref(&self) -> String {
        format!("refs/heads/{}", self.0)
    }
}

impl TryFrom<String> for BranchName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A Git object identifier, normalised to lower-case hex.
///
/// ```
/// use nostr_git::core::types::Oid;
///
/// let oid = Oid::new("ABC123DEF4567890ABC123DEF4567890ABC12345").unwrap();
/// assert_eq!(oid.as_str(), "abc123def4567890abc123def4567890abc12345");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Oid(String);

impl Oid {
    /// Create a validated object id (40 or 64 hex characters).
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::InvalidOid`] for any other length or non-hex input.
    pub fn new(oid: impl Into<String>) -> Result<Self, TypeError> {
        let oid = oid.into().to_ascii_lowercase();
        if oid.len() != 40 && oid.len() != 64 {
            return Err(TypeError::InvalidOid(format!(
                "expected 40 or 64 hex characters, got {}",
                oid.len()
            )));
        }
        if hex::decode(&oid).is_err() {
            return Err(TypeError::InvalidOid(format!("'{oid}' is not hexadecimal")));
        }
        Ok(Self(oid))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Oid {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Oid> for String {
    fn from(oid: Oid) -> Self {
        oid.0
    }
}

impl std::fmt::Display for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
