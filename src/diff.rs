//! Key-level diff between two preference sets

use crate::types::{PrefLookup, PrefValue, PreferenceSet};
use serde::Serialize;
use std::fmt;

/// A key present in both sets with different values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangedPref {
    pub key: String,
    pub old: PrefValue,
    pub new: PrefValue,
}

/// Result of comparing two preference sets
///
/// The four key lists partition the union of both sets' keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrefDiff {
    /// Keys only in the new set, in new-set order
    pub added: Vec<String>,
    /// Keys only in the old set, in old-set order
    pub removed: Vec<String>,
    /// Keys whose value differs, in new-set order
    pub changed: Vec<ChangedPref>,
    /// Keys with equal values in both sets, in new-set order
    pub unchanged: Vec<String>,
}

impl PrefDiff {
    /// True when the two sets hold the same preferences
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Compare two preference sets key by key
///
/// # Example
///
/// ```rust
/// use userjs::{diff, PreferenceSet, PrefValue};
///
/// let old: PreferenceSet = vec![("a", PrefValue::Bool(true)), ("b", PrefValue::Integer(1))]
///     .into_iter()
///     .collect();
/// let new: PreferenceSet = vec![("b", PrefValue::Integer(1)), ("c", PrefValue::from("x"))]
///     .into_iter()
///     .collect();
///
/// let report = diff(&old, &new);
/// assert_eq!(report.added, vec!["c"]);
/// assert_eq!(report.removed, vec!["a"]);
/// assert!(report.changed.is_empty());
/// ```
pub fn diff(old: &PreferenceSet, new: &PreferenceSet) -> PrefDiff {
    let mut report = PrefDiff::default();

    for (key, new_value) in new.iter() {
        match old.get(key) {
            None => report.added.push(key.to_string()),
            Some(old_value) if old_value != new_value => report.changed.push(ChangedPref {
                key: key.to_string(),
                old: old_value.clone(),
                new: new_value.clone(),
            }),
            Some(_) => report.unchanged.push(key.to_string()),
        }
    }

    report.removed = old
        .keys()
        .filter(|key| !new.contains_key(key))
        .map(str::to_string)
        .collect();

    report
}

/// Text report: `+` added, `-` removed, `~` changed
impl fmt::Display for PrefDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for key in &self.added {
            writeln!(f, "+ {}", key)?;
        }
        for key in &self.removed {
            writeln!(f, "- {}", key)?;
        }
        for change in &self.changed {
            writeln!(f, "~ {}: {} -> {}", change.key, change.old, change.new)?;
        }
        Ok(())
    }
}
