//! Serialization of preferences back to user.js text

use crate::types::{EffectiveConfiguration, PrefEntry, PreferenceSet};
use std::fmt::Write;

/// Escape a string so the loader decodes it back to the same value
pub(crate) fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

fn write_entries<'a>(entries: impl IntoIterator<Item = &'a PrefEntry>) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "user_pref(\"{}\", {});",
            escape_string(&entry.key),
            entry.value
        );
    }
    out
}

/// Render a preference set as user.js text, one statement per line
///
/// Loading the output yields a set equal to the input.
///
/// ```rust
/// use userjs::{load, to_user_js};
///
/// let set = load("user_pref(\"a.b\", \"x\\\"y\");\nuser_pref(\"c\", -3);")?;
/// let text = to_user_js(&set);
/// assert_eq!(text, "user_pref(\"a.b\", \"x\\\"y\");\nuser_pref(\"c\", -3);\n");
/// assert_eq!(load(&text)?, set);
/// # Ok::<(), userjs::Error>(())
/// ```
pub fn to_user_js(set: &PreferenceSet) -> String {
    write_entries(set.entries())
}

/// Render an effective configuration as user.js text
pub fn configuration_to_user_js(config: &EffectiveConfiguration) -> String {
    write_entries(config.entries())
}
