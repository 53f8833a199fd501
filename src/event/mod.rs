//! event
//!
//! Repository announcement events (NIP-34, kind `30617`).
//!
//! # Overview
//!
//! A repository announcement is a signed nostr event published by the
//! repository owner. Its tags carry the repository identifier (`d`), a
//! display name, clone URLs and relays. This module provides:
//!
//! - [`RepoAnnouncementEvent`] - the raw event as received
//! - [`assert_repo_announcement_event`] - structural validation
//! - [`parse_repo_announcement_event`] - extraction of [`RepoAnnouncement`]
//!
//! Signatures are not verified here.
//!
//! # Example
//!
//! ```
//! use nostr_git::event::{assert_repo_announcement_event, parse_repo_announcement_event, RepoAnnouncementEvent};
//!
//! let json = format!(
//!     r#"{{"pubkey":"{}","kind":30617,"tags":[["d","grasp"],["name","Grasp"]],"content":""}}"#,
//!     "ab".repeat(32)
//! );
//! let event = RepoAnnouncementEvent::from_json(&json).unwrap();
//! assert_repo_announcement_event(&event).unwrap();
//!
//! let repo = parse_repo_announcement_event(&event).unwrap();
//! assert_eq!(repo.repo_id, "grasp");
//! assert_eq!(repo.name.as_deref(), Some("Grasp"));
//! ```

mod validation;

pub use validation::assert_repo_announcement_event;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Event kind of a repository announcement.
pub const REPO_ANNOUNCEMENT_KIND: u32 = 30617;

/// Errors from event decoding and validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EventError {
    #[error("malformed event JSON: {0}")]
    Json(String),

    #[error("expected event kind {expected}, found {found}")]
    WrongKind { expected: u32, found: u32 },

    #[error("invalid event pubkey '{0}': expected 64 hex characters")]
    InvalidPubkey(String),

    #[error("repository announcement has no 'd' tag")]
    MissingRepoId,

    #[error("tag {index} is empty")]
    EmptyTag { index: usize },
}

/// A nostr event as received from a relay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoAnnouncementEvent {
    #[serde(default)]
    pub id: String,
    pub pubkey: String,
    #[serde(default)]
    pub created_at: u64,
    pub kind: u32,
    #[serde(default)]
    pub tags: Vec<Vec<String>>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub sig: String,
}

impl RepoAnnouncementEvent {
    /// Decode an event from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Json`] if the JSON does not describe an event.
    pub fn from_json(json: &str) -> Result<Self, EventError> {
        serde_json::from_str(json).map_err(|e| EventError::Json(e.to_string()))
    }

    /// Values of the first tag named `name`, without the name itself.
    pub fn tag_values(&self, name: &str) -> Option<&[String]> {
        self.tags
            .iter()
            .find(|tag| tag.first().map(String::as_str) == Some(name))
            .map(|tag| &tag[1..])
    }

    /// First value of the first tag named `name`.
    pub fn tag_value(&self, name: &str) -> Option<&str> {
        self.tag_values(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values of every tag named `name`, in order.
    pub fn all_tag_values(&self, name: &str) -> Vec<String> {
        self.tags
            .iter()
            .filter(|tag| tag.first().map(String::as_str) == Some(name))
            .flat_map(|tag| tag[1..].iter().cloned())
            .collect()
    }
}

/// The repository identity and metadata carried by an announcement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoAnnouncement {
    /// Publisher public key (hex).
    pub owner: String,
    /// Value of the `d` tag.
    pub repo_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub web: Vec<String>,
    pub clone: Vec<String>,
    pub relays: Vec<String>,
    pub maintainers: Vec<String>,
    /// Commit id marked `euc` in an `r` tag.
    pub earliest_unique_commit: Option<String>,
    /// Values of `t` tags.
    pub hashtags: Vec<String>,
}

/// Extract the repository announcement from an event.
///
/// Call [`assert_repo_announcement_event`] first; this only requires the
/// `d` tag to be present.
///
/// # Errors
///
/// Returns [`EventError::MissingRepoId`] if the event has no usable `d` tag.
pub fn parse_repo_announcement_event(
    event: &RepoAnnouncementEvent,
) -> Result<RepoAnnouncement, EventError> {
    let repo_id = event
        .tag_value("d")
        .filter(|id| !id.is_empty())
        .ok_or(EventError::MissingRepoId)?
        .to_string();

    let earliest_unique_commit = event
        .tags
        .iter()
        .find(|tag| tag.len() >= 3 && tag[0] == "r" && tag[2] == "euc")
        .map(|tag| tag[1].clone());

    let non_empty = |value: Option<&str>| value.filter(|v| !v.is_empty()).map(str::to_string);

    Ok(RepoAnnouncement {
        owner: event.pubkey.clone(),
        repo_id,
        name: non_empty(event.tag_value("name")),
        description: non_empty(event.tag_value("description")),
        web: event.all_tag_values("web"),
        clone: event.all_tag_values("clone"),
        relays: event.all_tag_values("relays"),
        maintainers: event.all_tag_values("maintainers"),
        earliest_unique_commit,
        hashtags: event.all_tag_values("t"),
    })
}
