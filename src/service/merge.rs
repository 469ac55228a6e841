//! Update merge policy.

use crate::config::UpdatePolicy;
use crate::domain::{parse_flag, FlagError, Item};
use serde::Deserialize;

/// Raw field values submitted with an update request.
///
/// Empty strings are treated the same as absent fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ItemChanges {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<String>,
}

impl ItemChanges {
    fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }

    fn completed(&self) -> Option<&str> {
        self.completed.as_deref().filter(|c| !c.is_empty())
    }
}

/// Apply `changes` to `item` under the given policy.
///
/// Under `Corrected` an unparseable `completed` value is an error and leaves
/// `item` untouched. `Legacy` never fails.
pub fn apply_changes(
    item: &mut Item,
    changes: &ItemChanges,
    policy: UpdatePolicy,
) -> Result<(), FlagError> {
    match policy {
        UpdatePolicy::Corrected => {
            if let Some(raw) = changes.completed() {
                item.completed = parse_flag(raw)?;
            }
        }
        UpdatePolicy::Legacy => {
            if let Some(raw) = changes.completed() {
                if let Err(e) = parse_flag(raw) {
                    tracing::warn!(id = %item.id, completed = %raw, error = %e, "Coercing unparseable completed flag");
                }
            }
            item.completed = true;
        }
    }

    if let Some(description) = changes.description() {
        item.description = description.to_string();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemId;

    fn item(completed: bool) -> Item {
        Item {
            id: ItemId::new(1),
            description: "buy milk".to_string(),
            completed,
        }
    }

    fn changes(description: Option<&str>, completed: Option<&str>) -> ItemChanges {
        ItemChanges {
            description: description.map(str::to_string),
            completed: completed.map(str::to_string),
        }
    }

    #[test]
    fn test_corrected_empty_update_is_noop() {
        let mut it = item(false);
        apply_changes(&mut it, &ItemChanges::default(), UpdatePolicy::Corrected).unwrap();
        assert_eq!(it, item(false));

        let mut it = item(true);
        apply_changes(&mut it, &changes(Some(""), Some("")), UpdatePolicy::Corrected).unwrap();
        assert_eq!(it, item(true));
    }

    #[test]
    fn test_corrected_uses_parsed_flag() {
        let mut it = item(false);
        apply_changes(&mut it, &changes(None, Some("true")), UpdatePolicy::Corrected).unwrap();
        assert!(it.completed);

        apply_changes(&mut it, &changes(None, Some("0")), UpdatePolicy::Corrected).unwrap();
        assert!(!it.completed);
    }

    #[test]
    fn test_corrected_rejects_garbage_without_mutating() {
        let mut it = item(false);
        let err = apply_changes(
            &mut it,
            &changes(Some("new text"), Some("maybe")),
            UpdatePolicy::Corrected,
        )
        .unwrap_err();

        assert_eq!(err, FlagError("maybe".to_string()));
        assert_eq!(it, item(false));
    }

    #[test]
    fn test_legacy_always_completes() {
        for flag in [None, Some(""), Some("false"), Some("0"), Some("maybe"), Some("true")] {
            let mut it = item(false);
            apply_changes(&mut it, &changes(None, flag), UpdatePolicy::Legacy).unwrap();
            assert!(it.completed, "flag {:?} should complete the item", flag);
        }
    }

    #[test]
    fn test_description_overwrites_only_when_non_empty() {
        let mut it = item(false);
        apply_changes(&mut it, &changes(Some("buy bread"), None), UpdatePolicy::Corrected).unwrap();
        assert_eq!(it.description, "buy bread");

        apply_changes(&mut it, &changes(Some(""), None), UpdatePolicy::Legacy).unwrap();
        assert_eq!(it.description, "buy bread");
    }
}
