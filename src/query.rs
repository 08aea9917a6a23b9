use crate::error::{Error, Result};
use crate::types::PreferenceSet;
use glob::Pattern;

/// Query preferences by glob patterns (OR logic)
/// Returns the preferences matching any of the provided patterns, in set order
pub fn query_preferences(preferences: &PreferenceSet, patterns: &[&str]) -> Result<PreferenceSet> {
    // Compile all patterns first to fail fast on invalid patterns
    let compiled_patterns: Vec<Pattern> = patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| Error::InvalidGlobPattern(format!("'{}': {}", p, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(preferences
        .iter()
        .filter(|(key, _)| compiled_patterns.iter().any(|pattern| pattern.matches(key)))
        .map(|(key, value)| (key, value.clone()))
        .collect())
}
