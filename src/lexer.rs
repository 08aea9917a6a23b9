//! Lexer for tokenizing user.js preference files
//!
//! This module converts source text into positioned tokens. It decodes string
//! escape sequences, skips line comments (with a configurable marker) and
//! `/* ... */` block comments, and tracks line/column numbers so that the
//! parser can report errors against the offending line.

use crate::error::{Error, Result};

/// Token types produced by the lexer
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Identifier (e.g., user_pref)
    Identifier(String),
    /// String value with escape sequences already processed
    String(String),
    /// Integer value
    Integer(i64),
    /// Boolean value
    Boolean(bool),
    /// Left parenthesis
    LeftParen,
    /// Right parenthesis
    RightParen,
    /// Comma
    Comma,
    /// Semicolon
    Semicolon,
    /// End of input
    Eof,
}

impl Token {
    /// Human-readable description for error messages
    pub fn describe(&self) -> String {
        match self {
            Token::Identifier(s) => format!("identifier '{}'", s),
            Token::String(_) => "string".to_string(),
            Token::Integer(n) => format!("integer {}", n),
            Token::Boolean(b) => format!("boolean {}", b),
            Token::LeftParen => "'('".to_string(),
            Token::RightParen => "')'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Semicolon => "';'".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

/// A token together with the position of its first character
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub line: usize,
    pub column: usize,
}

/// Lexer for tokenizing user.js files
pub struct Lexer<'a> {
    input: &'a str,
    /// Byte offset of the next unread character
    pos: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed, in characters)
    column: usize,
    /// Marker that starts a comment running to end of line
    comment_marker: &'a str,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input using `//` line comments
    #[cfg(test)]
    pub fn new(input: &'a str) -> Self {
        Self::with_comment_marker(input, "//")
    }

    /// Create a new lexer with a custom line comment marker
    pub fn with_comment_marker(input: &'a str, comment_marker: &'a str) -> Self {
        Lexer {
            input,
            pos: 0,
            line: 1,
            column: 1,
            comment_marker,
        }
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Result<Spanned> {
        self.skip_whitespace_and_comments()?;

        let (line, column) = (self.line, self.column);
        let Some(c) = self.peek() else {
            return Ok(Spanned {
                token: Token::Eof,
                line,
                column,
            });
        };

        let token = match c {
            '(' => {
                self.advance();
                Token::LeftParen
            }
            ')' => {
                self.advance();
                Token::RightParen
            }
            ',' => {
                self.advance();
                Token::Comma
            }
            ';' => {
                self.advance();
                Token::Semicolon
            }
            '"' => self.lex_string()?,
            '-' | '+' | '0'..='9' => self.lex_integer()?,
            'a'..='z' | 'A'..='Z' | '_' => self.lex_identifier(),
            _ => return Err(self.error(line, column, format!("Unexpected character: '{}'", c))),
        };

        Ok(Spanned {
            token,
            line,
            column,
        })
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume one character, keeping line/column in sync
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Build a parse error for `line`, quoting that line's raw text
    fn error(&self, line: usize, column: usize, message: String) -> Error {
        Error::Parse {
            line,
            column,
            content: self.input.lines().nth(line - 1).unwrap_or("").to_string(),
            message,
        }
    }

    /// Skip whitespace, line comments and block comments
    fn skip_whitespace_and_comments(&mut self) -> Result<()> {
        loop {
            while let Some(c) = self.peek() {
                if c.is_whitespace() {
                    self.advance();
                } else {
                    break;
                }
            }

            if !self.comment_marker.is_empty() && self.rest().starts_with(self.comment_marker) {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
                continue;
            }

            if self.rest().starts_with("/*") {
                let (start_line, start_col) = (self.line, self.column);
                self.advance();
                self.advance();
                loop {
                    if self.rest().starts_with("*/") {
                        self.advance();
                        self.advance();
                        break;
                    }
                    if self.advance().is_none() {
                        return Err(self.error(
                            start_line,
                            start_col,
                            "Unterminated block comment".to_string(),
                        ));
                    }
                }
                continue;
            }

            return Ok(());
        }
    }

    /// Lex an identifier; `true` and `false` become booleans
    fn lex_identifier(&mut self) -> Token {
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                ident.push(c);
                self.advance();
            } else {
                break;
            }
        }

        match ident.as_str() {
            "true" => Token::Boolean(true),
            "false" => Token::Boolean(false),
            _ => Token::Identifier(ident),
        }
    }

    /// Lex a double-quoted string literal on a single line
    fn lex_string(&mut self) -> Result<Token> {
        let (start_line, start_col) = (self.line, self.column);

        // Opening quote
        self.advance();

        let mut result = String::new();

        loop {
            let (line, column) = (self.line, self.column);
            match self.peek() {
                Some('"') => {
                    self.advance();
                    return Ok(Token::String(result));
                }
                Some('\\') => {
                    self.advance();
                    let escaped = self.lex_escape(line, column)?;
                    result.push(escaped);
                }
                Some('\n') | Some('\r') | None => {
                    return Err(self.error(
                        start_line,
                        start_col,
                        "Unterminated string literal".to_string(),
                    ));
                }
                Some(c) => {
                    self.advance();
                    result.push(c);
                }
            }
        }
    }

    /// Decode the escape following a backslash at (`line`, `column`)
    fn lex_escape(&mut self, line: usize, column: usize) -> Result<char> {
        let c = match self.peek() {
            Some(c) if c != '\n' && c != '\r' => c,
            _ => {
                return Err(self.error(
                    line,
                    column,
                    "Unterminated string literal".to_string(),
                ))
            }
        };
        self.advance();

        match c {
            '"' => Ok('"'),
            '\'' => Ok('\''),
            '\\' => Ok('\\'),
            'n' => Ok('\n'),
            'r' => Ok('\r'),
            't' => Ok('\t'),
            'b' => Ok('\x08'),
            'f' => Ok('\x0c'),
            '0' => {
                if self.peek().is_some_and(|d| d.is_ascii_digit()) {
                    return Err(self.error(
                        line,
                        column,
                        "Octal escape sequences are not supported. Use \\x00 instead.".to_string(),
                    ));
                }
                Ok('\0')
            }
            'x' => {
                let code = self.lex_hex_digits(2, line, column, "hex")?;
                // Two hex digits always fit a char
                Ok(char::from(code as u8))
            }
            'u' => {
                let code = self.lex_hex_digits(4, line, column, "unicode")?;
                self.decode_utf16_escape(code, line, column)
            }
            other => Err(self.error(
                line,
                column,
                format!("Invalid escape sequence: \\{}", other),
            )),
        }
    }

    /// Turn a `\uNNNN` code unit into a char, pairing surrogates
    ///
    /// A high surrogate must be followed directly by a `\u` low surrogate;
    /// unpaired surrogates are rejected.
    fn decode_utf16_escape(&mut self, code: u32, line: usize, column: usize) -> Result<char> {
        let unpaired = |lexer: &Self| {
            lexer.error(
                line,
                column,
                format!("Invalid unicode escape: unpaired surrogate \\u{:04X}", code),
            )
        };

        match code {
            0xD800..=0xDBFF => {
                if !self.rest().starts_with("\\u") {
                    return Err(unpaired(self));
                }
                self.advance();
                self.advance();
                let low = self.lex_hex_digits(4, line, column, "unicode")?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(unpaired(self));
                }
                let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                char::from_u32(combined).ok_or_else(|| unpaired(self))
            }
            0xDC00..=0xDFFF => Err(unpaired(self)),
            _ => char::from_u32(code).ok_or_else(|| unpaired(self)),
        }
    }

    fn lex_hex_digits(
        &mut self,
        count: usize,
        line: usize,
        column: usize,
        kind: &str,
    ) -> Result<u32> {
        let mut hex = String::new();
        for _ in 0..count {
            match self.peek() {
                Some(c) if c.is_ascii_hexdigit() => {
                    hex.push(c);
                    self.advance();
                }
                _ => break,
            }
        }
        if hex.len() != count {
            return Err(self.error(
                line,
                column,
                format!("Incomplete {} escape: {}", kind, hex),
            ));
        }
        u32::from_str_radix(&hex, 16)
            .map_err(|_| self.error(line, column, format!("Invalid {} escape: {}", kind, hex)))
    }

    /// Lex a signed decimal integer
    ///
    /// Fractions, exponents and digits glued to letters are rejected rather
    /// than guessed at, since the value type would be ambiguous.
    fn lex_integer(&mut self) -> Result<Token> {
        let (line, column) = (self.line, self.column);

        let mut num_str = String::new();
        if let Some(sign @ ('-' | '+')) = self.peek() {
            if sign == '-' {
                num_str.push('-');
            }
            self.advance();
        }

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                num_str.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if !num_str.ends_with(|c: char| c.is_ascii_digit()) {
            return Err(self.error(line, column, "Expected digits after sign".to_string()));
        }

        if let Some(c) = self.peek() {
            if c == '.' || c.is_alphanumeric() || c == '_' {
                return Err(self.error(
                    line,
                    column,
                    format!(
                        "Ambiguous numeric literal '{}{}...': only integer values are supported",
                        num_str, c
                    ),
                ));
            }
        }

        num_str
            .parse::<i64>()
            .map(Token::Integer)
            .map_err(|_| self.error(line, column, format!("Integer out of range: {}", num_str)))
    }
}
