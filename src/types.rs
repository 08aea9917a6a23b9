//! Core preference types
//!
//! [`PreferenceSet`] is what the loader produces from one source and
//! [`EffectiveConfiguration`] is what merging overlays produces. Both are
//! ordered key/value mappings backed by the same storage, but only the
//! configuration can grow through [`crate::merge`].

use crate::error::{Error, Result};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// A preference value as written in a `user.js` file
///
/// The set of value types is closed: booleans, signed integers and strings.
/// Serializes to the matching plain JSON scalar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PrefValue {
    /// `true` or `false`
    Bool(bool),
    /// Signed integer literal
    Integer(i64),
    /// Double-quoted string literal, escapes already decoded
    String(String),
}

impl PrefValue {
    /// Returns the boolean if this is a `Bool`
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PrefValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is an `Integer`
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PrefValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string slice if this is a `String`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PrefValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the value's type, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            PrefValue::Bool(_) => "bool",
            PrefValue::Integer(_) => "integer",
            PrefValue::String(_) => "string",
        }
    }
}

/// Renders the value as a `user.js` literal
impl fmt::Display for PrefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefValue::Bool(b) => write!(f, "{}", b),
            PrefValue::Integer(n) => write!(f, "{}", n),
            PrefValue::String(s) => write!(f, "\"{}\"", crate::writer::escape_string(s)),
        }
    }
}

impl From<bool> for PrefValue {
    fn from(b: bool) -> Self {
        PrefValue::Bool(b)
    }
}

impl From<i64> for PrefValue {
    fn from(n: i64) -> Self {
        PrefValue::Integer(n)
    }
}

impl From<&str> for PrefValue {
    fn from(s: &str) -> Self {
        PrefValue::String(s.to_string())
    }
}

impl From<String> for PrefValue {
    fn from(s: String) -> Self {
        PrefValue::String(s)
    }
}

/// A single key/value pair, used for array-style output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrefEntry {
    pub key: String,
    pub value: PrefValue,
}

/// Insertion-ordered map shared by the set and configuration types
#[derive(Debug, Clone, Default)]
struct PrefMap {
    entries: Vec<PrefEntry>,
    index: HashMap<String, usize>,
}

impl PrefMap {
    /// Insert or replace in place, returning the previous value
    fn insert(&mut self, key: String, value: PrefValue) -> Option<PrefValue> {
        match self.index.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].value, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push(PrefEntry { key, value });
                None
            }
        }
    }

    fn get(&self, key: &str) -> Option<&PrefValue> {
        self.index.get(key).map(|&pos| &self.entries[pos].value)
    }
}

// Mapping equality: order carries no meaning beyond presentation.
impl PartialEq for PrefMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|e| other.get(&e.key) == Some(&e.value))
    }
}

impl Eq for PrefMap {}

impl Serialize for PrefMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.key, &entry.value)?;
        }
        map.end()
    }
}

/// Read access shared by [`PreferenceSet`] and [`EffectiveConfiguration`]
///
/// The typed getters return `Ok(None)` for a missing key and
/// [`Error::TypeMismatch`] when the key holds a different type.
///
/// ```rust
/// use userjs::{load, PrefLookup};
///
/// let set = load(r#"user_pref("browser.startup.page", 3);"#)?;
/// assert_eq!(set.get_i64("browser.startup.page")?, Some(3));
/// assert!(set.get_bool("browser.startup.page").is_err());
/// assert_eq!(set.get_bool("missing")?, None);
/// # Ok::<(), userjs::Error>(())
/// ```
pub trait PrefLookup {
    /// Raw value lookup
    fn get(&self, key: &str) -> Option<&PrefValue>;

    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        typed(key, self.get(key), "bool", PrefValue::as_bool)
    }

    fn get_i64(&self, key: &str) -> Result<Option<i64>> {
        typed(key, self.get(key), "integer", PrefValue::as_i64)
    }

    fn get_str(&self, key: &str) -> Result<Option<&str>> {
        typed(key, self.get(key), "string", PrefValue::as_str)
    }
}

fn typed<'a, T>(
    key: &str,
    value: Option<&'a PrefValue>,
    expected: &'static str,
    extract: impl FnOnce(&'a PrefValue) -> Option<T>,
) -> Result<Option<T>> {
    match value {
        None => Ok(None),
        Some(v) => extract(v).map(Some).ok_or_else(|| Error::TypeMismatch {
            key: key.to_string(),
            expected,
            found: v.type_name(),
        }),
    }
}

/// An ordered, immutable set of preferences loaded from one source
///
/// Keys are unique; the position of a key is that of its first occurrence in
/// the source while its value is that of the last one. Sets are built by the
/// loader or collected from `(key, value)` pairs with the same
/// last-write-wins rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PreferenceSet {
    map: PrefMap,
}

impl PreferenceSet {
    /// An empty set
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, key: String, value: PrefValue) -> Option<PrefValue> {
        self.map.insert(key, value)
    }

    pub fn len(&self) -> usize {
        self.map.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.entries.is_empty()
    }

    /// Entries in set order
    pub fn entries(&self) -> &[PrefEntry] {
        &self.map.entries
    }

    /// `(key, value)` pairs in set order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PrefValue)> {
        self.map.entries.iter().map(|e| (e.key.as_str(), &e.value))
    }

    /// Keys in set order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.entries.iter().map(|e| e.key.as_str())
    }
}

impl PrefLookup for PreferenceSet {
    fn get(&self, key: &str) -> Option<&PrefValue> {
        self.map.get(key)
    }
}

impl<K: Into<String>, V: Into<PrefValue>> FromIterator<(K, V)> for PreferenceSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = PreferenceSet::new();
        for (key, value) in iter {
            set.insert(key.into(), value.into());
        }
        set
    }
}

/// The resolved settings after applying zero or more overlays in order
///
/// Values of this type are never mutated in place by the public API:
/// [`crate::merge`] takes a configuration by reference and returns a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EffectiveConfiguration {
    map: PrefMap,
}

impl EffectiveConfiguration {
    /// An empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration whose starting state is the given set
    pub fn from_base(base: &PreferenceSet) -> Self {
        Self {
            map: base.map.clone(),
        }
    }

    pub(crate) fn apply(&mut self, overlay: &PreferenceSet) {
        for entry in overlay.entries() {
            self.map.insert(entry.key.clone(), entry.value.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.map.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.entries.is_empty()
    }

    pub fn entries(&self) -> &[PrefEntry] {
        &self.map.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PrefValue)> {
        self.map.entries.iter().map(|e| (e.key.as_str(), &e.value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.entries.iter().map(|e| e.key.as_str())
    }

    /// Snapshot the configuration as a preference set, e.g. for writing out
    pub fn to_preference_set(&self) -> PreferenceSet {
        PreferenceSet {
            map: self.map.clone(),
        }
    }
}

impl PrefLookup for EffectiveConfiguration {
    fn get(&self, key: &str) -> Option<&PrefValue> {
        self.map.get(key)
    }
}

impl From<PreferenceSet> for EffectiveConfiguration {
    fn from(set: PreferenceSet) -> Self {
        Self { map: set.map }
    }
}

impl<K: Into<String>, V: Into<PrefValue>> FromIterator<(K, V)> for EffectiveConfiguration {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        PreferenceSet::from_iter(iter).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_keeps_first_position_last_value() {
        let set: PreferenceSet = vec![
            ("a", PrefValue::Integer(1)),
            ("b", PrefValue::Bool(true)),
            ("a", PrefValue::Integer(2)),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(set.get("a"), Some(&PrefValue::Integer(2)));
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: PreferenceSet = vec![("x", true), ("y", false)].into_iter().collect();
        let b: PreferenceSet = vec![("y", false), ("x", true)].into_iter().collect();
        assert_eq!(a, b);

        let c: PreferenceSet = vec![("y", true), ("x", true)].into_iter().collect();
        assert_ne!(a, c);
    }

    #[test]
    fn test_value_display_as_literal() {
        assert_eq!(PrefValue::Bool(false).to_string(), "false");
        assert_eq!(PrefValue::Integer(-42).to_string(), "-42");
        assert_eq!(
            PrefValue::from("say \"hi\"").to_string(),
            r#""say \"hi\"""#
        );
    }

    #[test]
    fn test_typed_lookup() {
        let set: PreferenceSet = vec![
            ("flag", PrefValue::Bool(true)),
            ("count", PrefValue::Integer(7)),
            ("name", PrefValue::from("ok")),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.get_bool("flag").unwrap(), Some(true));
        assert_eq!(set.get_i64("count").unwrap(), Some(7));
        assert_eq!(set.get_str("name").unwrap(), Some("ok"));
        assert_eq!(set.get_str("absent").unwrap(), None);

        match set.get_str("count") {
            Err(Error::TypeMismatch {
                key,
                expected,
                found,
            }) => {
                assert_eq!(key, "count");
                assert_eq!(expected, "string");
                assert_eq!(found, "integer");
            }
            other => panic!("Expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_serialize_as_ordered_object() {
        let set: PreferenceSet = vec![
            ("z.last", PrefValue::Bool(true)),
            ("a.first", PrefValue::Integer(1)),
            ("m.mid", PrefValue::from("s")),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"z.last":true,"a.first":1,"m.mid":"s"}"#);
    }

    #[test]
    fn test_configuration_from_base() {
        let base: PreferenceSet = vec![("x", true)].into_iter().collect();
        let config = EffectiveConfiguration::from_base(&base);
        assert_eq!(config.get("x"), Some(&PrefValue::Bool(true)));
        assert_eq!(config.to_preference_set(), base);
    }
}
