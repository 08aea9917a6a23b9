//! Property-based tests for the loader, merger and diff
//!
//! Uses proptest to check the invariants over generated preference sets.

use proptest::prelude::*;
use std::collections::HashSet;
use userjs::{
    diff, load, merge, to_user_js, EffectiveConfiguration, PrefLookup, PrefValue, PreferenceSet,
};

fn pref_key() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z][a-zA-Z0-9_]{0,6}", 1..4).prop_map(|parts| parts.join("."))
}

fn pref_value() -> impl Strategy<Value = PrefValue> {
    prop_oneof![
        any::<bool>().prop_map(PrefValue::Bool),
        any::<i64>().prop_map(PrefValue::Integer),
        any::<String>().prop_map(PrefValue::String),
    ]
}

fn pref_set() -> impl Strategy<Value = PreferenceSet> {
    prop::collection::vec((pref_key(), pref_value()), 0..12)
        .prop_map(|pairs| pairs.into_iter().collect())
}

proptest! {
    #[test]
    fn round_trip_through_user_js(set in pref_set()) {
        let loaded = load(&to_user_js(&set)).unwrap();
        prop_assert_eq!(&loaded, &set);

        // Writing the reloaded set again is stable
        let reloaded = load(&to_user_js(&loaded)).unwrap();
        prop_assert_eq!(reloaded, loaded);
    }

    #[test]
    fn merge_is_idempotent(base in pref_set(), overlay in pref_set()) {
        let base = EffectiveConfiguration::from(base);
        let once = merge(&base, &overlay);
        let twice = merge(&once, &overlay);
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.keys().collect::<Vec<_>>(), twice.keys().collect::<Vec<_>>());
    }

    #[test]
    fn merge_overlay_wins_base_kept(base in pref_set(), overlay in pref_set()) {
        let merged = merge(&EffectiveConfiguration::from(base.clone()), &overlay);
        for (key, value) in overlay.iter() {
            prop_assert_eq!(merged.get(key), Some(value));
        }
        for (key, value) in base.iter() {
            if !overlay.contains_key(key) {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
    }

    #[test]
    fn diff_partitions_key_union(old in pref_set(), new in pref_set()) {
        let report = diff(&old, &new);

        let mut seen = HashSet::new();
        let classified = report
            .added
            .iter()
            .chain(report.removed.iter())
            .chain(report.changed.iter().map(|c| &c.key))
            .chain(report.unchanged.iter());
        for key in classified {
            prop_assert!(seen.insert(key.clone()), "key {} classified twice", key);
        }

        let union: HashSet<String> = old.keys().chain(new.keys()).map(str::to_string).collect();
        prop_assert_eq!(seen, union);
    }

    #[test]
    fn diff_of_set_with_itself_is_empty(set in pref_set()) {
        let report = diff(&set, &set);
        prop_assert!(report.is_empty());
        prop_assert_eq!(report.unchanged.len(), set.len());
    }
}
