//! core::canonical
//!
//! Canonical repository keys.
//!
//! A repository announced over nostr is identified by its publisher and a
//! short identifier. The canonical key combines the two into a stable
//! `<owner>/<name>` string that selects the repository's working directory.
//!
//! # Accepted identifiers
//!
//! - `<owner>:<name>` or `<owner>/<name>`
//! - `<owner>` is a 64 character hex public key or its NIP-19 `npub1`
//!   encoding; either way the key carries the lower-case hex form
//! - `<name>` is a single path segment
//!
//! A bare name such as `grasp` has no owner and is rejected; callers with
//! an announcement event fall back to [`fallback_identifier`].
//!
//! # Example
//!
//! ```
//! use nostr_git::core::canonical::canonical_repo_key;
//!
//! let owner = "a".repeat(64);
//! let key = canonical_repo_key(&format!("{owner}:grasp")).unwrap();
//! assert_eq!(key, format!("{owner}/grasp"));
//!
//! assert!(canonical_repo_key("grasp").is_err());
//! ```

use thiserror::Error;

/// Errors from canonical key derivation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("repository identifier is empty")]
    Empty,

    #[error("repository identifier '{0}' has no owner")]
    MissingOwner(String),

    #[error("invalid repository owner '{0}': expected a hex public key or npub")]
    InvalidOwner(String),

    #[error("invalid repository name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },
}

/// Human-readable part of a NIP-19 public key.
const NPUB_HRP: &str = "npub";

/// Length of a public key in bytes.
const PUBKEY_LEN: usize = 32;

/// Derive the canonical key for a repository identifier.
///
/// # Errors
///
/// Returns a [`KeyError`] when the identifier has no owner, the owner is not
/// a public key, or the name is not a usable directory segment.
pub fn canonical_repo_key(identifier: &str) -> Result<String, KeyError> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(KeyError::Empty);
    }

    let (owner, name) = identifier
        .split_once([':', '/'])
        .ok_or_else(|| KeyError::MissingOwner(identifier.to_string()))?;

    let owner = normalize_owner(owner)?;
    check_name(name)?;

    Ok(format!("{owner}/{name}"))
}

/// The identifier tried when an announcement's own id does not canonicalize.
///
/// Combines the publisher's public key with the announced name, or with the
/// repository id when no name was announced.
pub fn fallback_identifier(pubkey: &str, name: Option<&str>, repo_id: &str) -> String {
    let label = name.filter(|n| !n.is_empty()).unwrap_or(repo_id);
    format!("{pubkey}:{label}")
}

fn normalize_owner(owner: &str) -> Result<String, KeyError> {
    if owner.len() == 64 && hex::decode(owner).is_ok() {
        return Ok(owner.to_ascii_lowercase());
    }

    decode_npub(owner).ok_or_else(|| KeyError::InvalidOwner(owner.to_string()))
}

/// Hex public key of a checksummed `npub1` string.
fn decode_npub(owner: &str) -> Option<String> {
    let (hrp, data) = bech32::decode(owner).ok()?;
    if !hrp.as_str().eq_ignore_ascii_case(NPUB_HRP) || data.len() != PUBKEY_LEN {
        return None;
    }
    Some(hex::encode(data))
}

fn check_name(name: &str) -> Result<(), KeyError> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name == "." || name == ".." {
        Some("name is a relative path")
    } else if name.contains(['/', '\\', ':']) {
        Some("name contains a path separator")
    } else if name.trim() != name {
        Some("name has surrounding whitespace")
    } else if name.chars().any(char::is_control) {
        Some("name contains control characters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(KeyError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
