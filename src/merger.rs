//! Overlay merger
//!
//! This module applies preference sets on top of an effective configuration.
//! Overlays are applied in order and the last one to set a key wins, the same
//! precedence a browser uses when reading defaults and then a user.js.

use crate::error::Result;
use crate::loader::{load_file_with_config, LoaderConfig};
use crate::types::{EffectiveConfiguration, PrefLookup, PrefValue, PreferenceSet};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Apply an overlay onto a base configuration
///
/// Every key of `overlay` takes the overlay's value; keys only present in
/// `base` are kept unchanged. Neither input is modified. Keys new to the
/// configuration are appended in overlay order.
///
/// Applying the same overlay again returns an equal configuration.
///
/// # Example
///
/// ```rust
/// use userjs::{merge, EffectiveConfiguration, PreferenceSet, PrefValue};
///
/// let base: EffectiveConfiguration = vec![("x", true)].into_iter().collect();
/// let overlay: PreferenceSet = vec![("x", PrefValue::Bool(false)), ("y", PrefValue::Integer(5))]
///     .into_iter()
///     .collect();
///
/// let merged = merge(&base, &overlay);
/// let expected: EffectiveConfiguration =
///     vec![("x", PrefValue::Bool(false)), ("y", PrefValue::Integer(5))]
///         .into_iter()
///         .collect();
/// assert_eq!(merged, expected);
/// assert_eq!(merge(&merged, &overlay), merged);
/// ```
pub fn merge(base: &EffectiveConfiguration, overlay: &PreferenceSet) -> EffectiveConfiguration {
    let mut result = base.clone();
    result.apply(overlay);
    result
}

/// Apply several overlays in order, starting from `base`
pub fn merge_all(base: &EffectiveConfiguration, overlays: &[PreferenceSet]) -> EffectiveConfiguration {
    overlays.iter().fold(base.clone(), |acc, overlay| merge(&acc, overlay))
}

/// Get the effective value for a preference key
///
/// # Example
///
/// ```rust
/// use userjs::{get_effective_pref, load, EffectiveConfiguration, PrefValue};
///
/// let config = EffectiveConfiguration::from_base(&load(r#"user_pref("test", true);"#)?);
/// assert_eq!(get_effective_pref(&config, "test"), Some(&PrefValue::Bool(true)));
/// assert_eq!(get_effective_pref(&config, "other"), None);
/// # Ok::<(), userjs::Error>(())
/// ```
pub fn get_effective_pref<'a>(config: &'a EffectiveConfiguration, key: &str) -> Option<&'a PrefValue> {
    config.get(key)
}

/// Configuration for merging preference files
///
/// # Example
///
/// ```rust
/// use userjs::{LoaderConfig, MergeConfig};
///
/// let config = MergeConfig {
///     loader: LoaderConfig::default(),
///     continue_on_error: false,
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct MergeConfig {
    /// Settings used to load every file
    pub loader: LoaderConfig,
    /// Skip files that fail to load instead of aborting
    pub continue_on_error: bool,
}

/// Result of merging a sequence of preference files
#[derive(Debug, Clone, Serialize)]
pub struct MergedPreferences {
    /// The resolved configuration
    pub config: EffectiveConfiguration,
    /// Files that were loaded and applied, in order
    pub loaded_sources: Vec<PathBuf>,
    /// Problems with files that were skipped
    pub warnings: Vec<String>,
}

/// Load each file in order and merge it onto an empty configuration
///
/// Later files take precedence over earlier ones. With
/// `continue_on_error` set, a file that fails to load is skipped and noted
/// in `warnings`; otherwise the first failure is returned.
///
/// # Example
///
/// ```rust,no_run
/// use userjs::{merge_files, MergeConfig};
/// use std::path::PathBuf;
///
/// let files = [PathBuf::from("defaults.js"), PathBuf::from("user.js")];
/// let merged = merge_files(&files, &MergeConfig::default())?;
/// println!("Loaded {} preferences", merged.config.len());
/// # Ok::<(), userjs::Error>(())
/// ```
pub fn merge_files<P: AsRef<Path>>(paths: &[P], config: &MergeConfig) -> Result<MergedPreferences> {
    let mut effective = EffectiveConfiguration::new();
    let mut loaded_sources = Vec::new();
    let mut warnings = Vec::new();

    for path in paths {
        let path = path.as_ref();
        match load_file_with_config(path, &config.loader) {
            Ok(overlay) => {
                tracing::info!(
                    path = %path.display(),
                    count = overlay.len(),
                    "Applying preference overlay"
                );
                effective = merge(&effective, &overlay);
                loaded_sources.push(path.to_path_buf());
            }
            Err(e) => {
                if !config.continue_on_error {
                    return Err(e);
                }
                tracing::warn!(path = %path.display(), error = %e, "Skipping preference file");
                warnings.push(format!("Failed to load {}: {}", path.display(), e));
            }
        }
    }

    Ok(MergedPreferences {
        config: effective,
        loaded_sources,
        warnings,
    })
}
