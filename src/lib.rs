//! # userjs - user.js preference overlays
//!
//! This library loads Firefox-style `user.js` preference files, merges them
//! as overlays onto an effective configuration and reports the differences
//! between two variants.
//!
//! ## Features
//!
//! - Load `user_pref("key", value);` statements into an ordered [`PreferenceSet`]
//! - Line and column accurate [`Error::Parse`] errors quoting the offending line
//! - Merge overlays onto an [`EffectiveConfiguration`] with last-writer-wins precedence
//! - Diff two sets into added, removed and changed keys
//! - Query preferences using glob patterns (e.g., `"network.*"`)
//! - Write sets back out as user.js text
//!
//! ## Quick Start
//!
//! ### Loading Preferences
//!
//! ```rust
//! use userjs::{load, PrefLookup, PrefValue};
//!
//! let content = r#"
//!     // startup
//!     user_pref("browser.startup.homepage", "https://example.com");
//!     user_pref("javascript.enabled", true);
//! "#;
//!
//! let prefs = load(content)?;
//! assert_eq!(
//!     prefs.get("browser.startup.homepage"),
//!     Some(&PrefValue::String("https://example.com".to_string()))
//! );
//! assert_eq!(prefs.get_bool("javascript.enabled")?, Some(true));
//! # Ok::<(), userjs::Error>(())
//! ```
//!
//! ### Merging Overlays
//!
//! ```rust
//! use userjs::{load, merge, EffectiveConfiguration, PrefLookup, PrefValue};
//!
//! let defaults = load(r#"user_pref("general.smoothScroll", true);"#)?;
//! let hardening = load(r#"user_pref("general.smoothScroll", false);"#)?;
//!
//! let effective = merge(&EffectiveConfiguration::from_base(&defaults), &hardening);
//! assert_eq!(effective.get("general.smoothScroll"), Some(&PrefValue::Bool(false)));
//! # Ok::<(), userjs::Error>(())
//! ```
//!
//! ### Comparing Variants
//!
//! ```rust
//! use userjs::{diff, load};
//!
//! let old = load("user_pref(\"a\", true);\nuser_pref(\"b\", 1);")?;
//! let new = load("user_pref(\"b\", 1);\nuser_pref(\"c\", \"x\");")?;
//!
//! let report = diff(&old, &new);
//! assert_eq!(report.added, vec!["c"]);
//! assert_eq!(report.removed, vec!["a"]);
//! assert!(report.changed.is_empty());
//! # Ok::<(), userjs::Error>(())
//! ```
//!
//! ### Querying Preferences
//!
//! ```rust
//! use userjs::{load, query_preferences};
//!
//! let content = r#"
//!     user_pref("network.proxy.http", "proxy.example.com");
//!     user_pref("network.proxy.http_port", 8080);
//!     user_pref("browser.startup.homepage", "https://example.com");
//! "#;
//!
//! let prefs = load(content)?;
//! let network_prefs = query_preferences(&prefs, &["network.*"])?;
//! assert_eq!(network_prefs.len(), 2);
//! # Ok::<(), userjs::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All fallible functions return [`Result<T, Error>`]:
//!
//! ```rust
//! use userjs::{load, Error};
//!
//! match load("user_pref(\"a\" true)") {
//!     Ok(_) => println!("Parsed successfully"),
//!     Err(Error::Parse { line, column, content, message }) => {
//!         eprintln!("{}:{}: {} in `{}`", line, column, message, content);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

// Re-export all public types at crate root
pub use types::{EffectiveConfiguration, PrefEntry, PrefLookup, PrefValue, PreferenceSet};

// Re-export error types
pub use error::{Error, Result};

// Re-export all public functions at crate root
pub use diff::{diff, ChangedPref, PrefDiff};
pub use loader::{load, load_file, load_file_with_config, load_with_config, LoaderConfig};
pub use merger::{get_effective_pref, merge, merge_all, merge_files, MergeConfig, MergedPreferences};
pub use query::query_preferences;
pub use writer::{configuration_to_user_js, to_user_js};

// All modules are private - use re-exports above for public API
mod diff;
mod error;
mod lexer;
mod loader;
mod merger;
mod query;
mod types;
mod writer;
