//! event::validation
//!
//! Structural checks for repository announcement events.

use super::{EventError, RepoAnnouncementEvent, REPO_ANNOUNCEMENT_KIND};

/// Check that an event is structurally a repository announcement.
///
/// Checks, in order: the kind is `30617`, the pubkey is 64 hex characters,
/// no tag is empty, and a non-empty `d` tag exists.
///
/// # Errors
///
/// Returns the [`EventError`] for the first failed check.
pub fn assert_repo_announcement_event(event: &RepoAnnouncementEvent) -> Result<(), EventError> {
    if event.kind != REPO_ANNOUNCEMENT_KIND {
        return Err(EventError::WrongKind {
            expected: REPO_ANNOUNCEMENT_KIND,
            found: event.kind,
        });
    }

    if event.pubkey.len() != 64 || hex::decode(&event.pubkey).is_err() {
        return Err(EventError::InvalidPubkey(event.pubkey.clone()));
    }

    if let Some(index) = event.tags.iter().position(|tag| tag.is_empty()) {
        return Err(EventError::EmptyTag { index });
    }

    match event.tag_value("d") {
        Some(id) if !id.is_empty() => Ok(()),
        _ => Err(EventError::MissingRepoId),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> RepoAnnouncementEvent {
        RepoAnnouncementEvent {
            pubkey: "0f".repeat(32),
            kind: REPO_ANNOUNCEMENT_KIND,
            tags: vec![vec!["d".into(), "repo".into()]],
            ..Default::default()
        }
    }

    #[test]
    fn accepts_minimal_announcement() {
        assert_eq!(assert_repo_announcement_event(&valid()), Ok(()));
    }

    #[test]
    fn rejects_other_kinds() {
        let event = RepoAnnouncementEvent { kind: 1, ..valid() };
        assert_eq!(
            assert_repo_announcement_event(&event),
            Err(EventError::WrongKind {
                expected: 30617,
                found: 1
            })
        );
    }

    #[test]
    fn rejects_bad_pubkeys() {
        let not_hex = "zz".repeat(32);
        for pubkey in ["", "abc", not_hex.as_str()] {
            let event = RepoAnnouncementEvent {
                pubkey: pubkey.to_string(),
                ..valid()
            };
            assert!(matches!(
                assert_repo_announcement_event(&event),
                Err(EventError::InvalidPubkey(_))
            ));
        }
    }

    #[test]
    fn rejects_empty_tags() {
        let mut event = valid();
        event.tags.push(Vec::new());
        assert_eq!(
            assert_repo_announcement_event(&event),
            Err(EventError::EmptyTag { index: 1 })
        );
    }

    #[test]
    fn requires_d_tag_value() {
        let mut event = valid();
        event.tags = vec![vec!["d".into()]];
        assert_eq!(
            assert_repo_announcement_event(&event),
            Err(EventError::MissingRepoId)
        );

        event.tags = vec![vec!["d".into(), String::new()]];
        assert_eq!(
            assert_repo_announcement_event(&event),
            Err(EventError::MissingRepoId)
        );
    }
}
