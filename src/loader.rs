//! Loader for user.js preference files
//!
//! This module provides a recursive descent parser that turns the
//! `user_pref(...)` statements of a user.js file into a [`PreferenceSet`].
//!
//! # Format
//!
//! ```text
//! // comment lines start with the comment marker
//! /* block comments may
//!    span lines */
//! user_pref("preference.name", true);
//! user_pref("preference.name", -1);         // trailing comments are fine
//! user_pref("preference.name", "a string");
//! ```
//!
//! Each statement must start and end on a single line, and a line holds at
//! most one statement. Values are booleans, signed integers or double-quoted
//! strings; anything else is rejected.
//!
//! # Example
//!
//! ```rust
//! use userjs::{load, PrefLookup, PrefValue};
//!
//! let content = r#"
//!     // This is a comment
//!     user_pref("browser.startup.homepage", "https://example.com");
//!     user_pref("general.smoothScroll", true);
//!     user_pref("general.smoothScroll", false);
//! "#;
//!
//! let prefs = load(content)?;
//! assert_eq!(prefs.len(), 2);
//! assert_eq!(prefs.get("general.smoothScroll"), Some(&PrefValue::Bool(false)));
//! # Ok::<(), userjs::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::lexer::{Lexer, Spanned, Token};
use crate::types::{PrefValue, PreferenceSet};
use std::path::Path;

/// The only statement function accepted in user.js files
const USER_PREF: &str = "user_pref";

/// Loader settings
///
/// # Example
///
/// ```rust
/// use userjs::{load_with_config, LoaderConfig};
///
/// let config = LoaderConfig {
///     comment_marker: "#".to_string(),
/// };
/// let prefs = load_with_config("# note\nuser_pref(\"a\", 1);", &config)?;
/// assert_eq!(prefs.len(), 1);
/// # Ok::<(), userjs::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Marker that starts a comment running to end of line
    pub comment_marker: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            comment_marker: "//".to_string(),
        }
    }
}

/// Load a preference set from user.js text with the default settings
///
/// Blank lines and comments are skipped. When a key is assigned more than
/// once the last assignment wins. The whole source must parse; the first
/// malformed line aborts the load with [`Error::Parse`].
///
/// # Example
///
/// ```rust
/// use userjs::{load, Error};
///
/// let err = load("user_pref(\"ok\", 1);\nuser_pref(\"a\" true)").unwrap_err();
/// assert!(matches!(err, Error::Parse { line: 2, .. }));
/// ```
pub fn load(content: &str) -> Result<PreferenceSet> {
    load_with_config(content, &LoaderConfig::default())
}

/// Load a preference set from user.js text
pub fn load_with_config(content: &str, config: &LoaderConfig) -> Result<PreferenceSet> {
    let mut parser = Parser::new(content, &config.comment_marker)?;
    let set = parser.parse()?;
    tracing::debug!(count = set.len(), "Parsed preference set");
    Ok(set)
}

/// Load a user.js file directly from a file path
///
/// This is a convenience function that reads the file and parses it in one step.
pub fn load_file(path: &Path) -> Result<PreferenceSet> {
    load_file_with_config(path, &LoaderConfig::default())
}

/// Load a user.js file with custom loader settings
pub fn load_file_with_config(path: &Path, config: &LoaderConfig) -> Result<PreferenceSet> {
    tracing::debug!(path = %path.display(), "Reading preference file");
    let content = std::fs::read_to_string(path)?;
    load_with_config(&content, config)
}

/// Parser for user.js files
struct Parser<'a> {
    input: &'a str,
    lexer: Lexer<'a>,
    /// Current lookahead token
    current: Spanned,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, comment_marker: &'a str) -> Result<Self> {
        let mut lexer = Lexer::with_comment_marker(input, comment_marker);
        let current = lexer.next_token()?;
        Ok(Parser {
            input,
            lexer,
            current,
        })
    }

    /// Parse the entire input into a preference set
    fn parse(&mut self) -> Result<PreferenceSet> {
        let mut preferences = PreferenceSet::new();

        while self.current.token != Token::Eof {
            let (line, key, value) = self.parse_statement()?;
            if let Some(previous) = preferences.insert(key.clone(), value) {
                tracing::debug!(%key, line, %previous, "Duplicate preference overrides earlier value");
            }
        }

        Ok(preferences)
    }

    /// Parse a single statement: "user_pref" "(" key "," value ")" ";"
    fn parse_statement(&mut self) -> Result<(usize, String, PrefValue)> {
        let line = self.current.line;

        self.expect_function(line)?;
        self.expect_token(Token::LeftParen, line)?;
        let key = self.expect_string(line)?;
        self.expect_token(Token::Comma, line)?;
        let value = self.parse_value(line)?;
        self.expect_token(Token::RightParen, line)?;
        self.expect_token(Token::Semicolon, line)?;

        if self.current.token != Token::Eof && self.current.line == line {
            return Err(self.error_here(format!(
                "Unexpected {} after ';': one statement per line",
                self.current.token.describe()
            )));
        }

        Ok((line, key, value))
    }

    fn expect_function(&mut self, line: usize) -> Result<()> {
        self.ensure_on_line(line, "user_pref")?;
        let problem = match &self.current.token {
            Token::Identifier(ident) if ident == USER_PREF => None,
            Token::Identifier(ident) => Some(format!(
                "Unknown pref function '{}'. Expected {}",
                ident, USER_PREF
            )),
            other => Some(format!("Expected {}, got {}", USER_PREF, other.describe())),
        };
        match problem {
            Some(message) => Err(self.error_here(message)),
            None => self.advance(),
        }
    }

    /// Parse a value (string, integer, boolean)
    fn parse_value(&mut self, line: usize) -> Result<PrefValue> {
        self.ensure_on_line(line, "value")?;
        let value = match &self.current.token {
            Token::String(s) => PrefValue::String(s.clone()),
            Token::Integer(n) => PrefValue::Integer(*n),
            Token::Boolean(b) => PrefValue::Bool(*b),
            other => {
                return Err(self.error_here(format!(
                    "Expected value (true, false, integer or string), got {}",
                    other.describe()
                )))
            }
        };
        self.advance()?;
        Ok(value)
    }

    /// Expect a specific token and consume it
    fn expect_token(&mut self, expected: Token, line: usize) -> Result<()> {
        let what = expected.describe();
        self.ensure_on_line(line, &what)?;
        if self.current.token == expected {
            self.advance()
        } else {
            Err(self.error_here(format!(
                "Expected {}, got {}",
                what,
                self.current.token.describe()
            )))
        }
    }

    /// Expect a string token and return its value
    fn expect_string(&mut self, line: usize) -> Result<String> {
        self.ensure_on_line(line, "string key")?;
        match &mut self.current.token {
            Token::String(s) => {
                let key = std::mem::take(s);
                self.advance()?;
                Ok(key)
            }
            other => {
                let got = other.describe();
                Err(self.error_here(format!("Expected string key, got {}", got)))
            }
        }
    }

    /// Fail when the statement started on `line` runs past the end of it
    fn ensure_on_line(&self, line: usize, expected: &str) -> Result<()> {
        if self.current.token != Token::Eof && self.current.line == line {
            return Ok(());
        }
        let content = self.line_content(line);
        Err(Error::Parse {
            line,
            column: content.chars().count() + 1,
            content: content.to_string(),
            message: format!("Expected {} before end of line", expected),
        })
    }

    fn error_here(&self, message: String) -> Error {
        Error::Parse {
            line: self.current.line,
            column: self.current.column,
            content: self.line_content(self.current.line).to_string(),
            message,
        }
    }

    fn line_content(&self, line: usize) -> &'a str {
        self.input.lines().nth(line - 1).unwrap_or("")
    }

    /// Advance to the next token
    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrefLookup;

    #[test]
    fn test_load_string() {
        let input = r#"user_pref("browser.startup.homepage", "https://example.com");"#;
        let result = load(input).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(
            result.get("browser.startup.homepage"),
            Some(&PrefValue::String("https://example.com".to_string()))
        );
    }

    #[test]
    fn test_load_boolean_and_integer() {
        let input = r#"
            user_pref("javascript.enabled", true);
            user_pref("network.cookie.cookieBehavior", 0);
            user_pref("privacy.resistFingerprinting.letterboxing.dimensions", -1);
        "#;
        let result = load(input).unwrap();
        assert_eq!(result.get("javascript.enabled"), Some(&PrefValue::Bool(true)));
        assert_eq!(
            result.get("network.cookie.cookieBehavior"),
            Some(&PrefValue::Integer(0))
        );
        assert_eq!(
            result.get("privacy.resistFingerprinting.letterboxing.dimensions"),
            Some(&PrefValue::Integer(-1))
        );
    }

    #[test]
    fn test_load_preserves_source_order() {
        let input = r#"
            user_pref("c", 1);
            user_pref("a", 2);
            user_pref("b", 3);
        "#;
        let result = load(input).unwrap();
        assert_eq!(result.keys().collect::<Vec<_>>(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_load_duplicate_last_wins() {
        let input = r#"
            user_pref("general.smoothScroll", true);
            user_pref("general.smoothScroll", false);
        "#;
        let result = load(input).unwrap();
        let expected: PreferenceSet = vec![("general.smoothScroll", false)].into_iter().collect();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_load_with_comments() {
        let input = r#"
            /******
             * section banner
             ******/
            // This is a comment
            user_pref("browser.startup.homepage", "https://example.com"); // trailing
            /* inline */ user_pref("javascript.enabled", true);
        "#;
        let result = load(input).unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_load_empty_and_comment_only() {
        assert!(load("").unwrap().is_empty());
        assert!(load("\n\n   \n// nothing here\n").unwrap().is_empty());
    }

    #[test]
    fn test_load_url_with_slashes_and_commas() {
        let input = r#"user_pref("complex.url", "http://example.com?foo=bar,baz");"#;
        let result = load(input).unwrap();
        assert_eq!(
            result.get("complex.url"),
            Some(&PrefValue::from("http://example.com?foo=bar,baz"))
        );
    }

    #[test]
    fn test_missing_comma_reports_line() {
        let input = "// header\n\nuser_pref(\"a\" true)\n";
        match load(input) {
            Err(Error::Parse {
                line,
                content,
                message,
                ..
            }) => {
                assert_eq!(line, 3);
                assert_eq!(content, "user_pref(\"a\" true)");
                assert!(message.contains("','"), "message: {}", message);
            }
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_semicolon_reports_statement_line() {
        let input = "user_pref(\"a\", 1)\nuser_pref(\"b\", 2);";
        let err = load(input).unwrap_err();
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn test_statement_split_across_lines_rejected() {
        let input = "user_pref(\"a\",\n 1);";
        let err = load(input).unwrap_err();
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn test_two_statements_on_one_line_rejected() {
        let input = r#"user_pref("a", 1); user_pref("b", 2);"#;
        assert!(load(input).is_err());
    }

    #[test]
    fn test_unknown_function_rejected() {
        for input in [
            r#"pref("a", 1);"#,
            r#"lock_pref("a", 1);"#,
            r#"user_prefs("a", 1);"#,
        ] {
            match load(input) {
                Err(Error::Parse { message, .. }) => {
                    assert!(message.contains("Unknown pref function"))
                }
                other => panic!("Expected parse error for {}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_ambiguous_values_rejected() {
        for input in [
            r#"user_pref("a", 3.14);"#,
            r#"user_pref("a", null);"#,
            r#"user_pref("a", yes);"#,
            r#"user_pref("a", 'single');"#,
            r#"user_pref("a", 0x10);"#,
        ] {
            assert!(load(input).is_err(), "should reject {}", input);
        }
    }

    #[test]
    fn test_unterminated_string_rejected() {
        let input = "user_pref(\"ok\", 1);\nuser_pref(\"a\", \"open);\n";
        let err = load(input).unwrap_err();
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_non_string_key_rejected() {
        assert!(load("user_pref(a, 1);").is_err());
        assert!(load("user_pref(1, 1);").is_err());
    }

    #[test]
    fn test_custom_comment_marker() {
        let config = LoaderConfig {
            comment_marker: "#".to_string(),
        };
        let input = "# hash comment\nuser_pref(\"a\", true); # trailing\n";
        let result = load_with_config(input, &config).unwrap();
        assert_eq!(result.get("a"), Some(&PrefValue::Bool(true)));

        // `//` is no longer a comment with a custom marker
        assert!(load_with_config("// nope\n", &config).is_err());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.js");
        std::fs::write(&path, "user_pref(\"a\", \"b\");\n").unwrap();

        let result = load_file(&path).unwrap();
        assert_eq!(result.get("a"), Some(&PrefValue::from("b")));
    }

    #[test]
    fn test_load_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("absent.js")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
