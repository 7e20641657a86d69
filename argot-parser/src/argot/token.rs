//! Token buffer and token-shape classification
//!
//! The matching engine never mutates the argument vector. A [`TokenBuffer`] is
//! a shared, immutable view over the full argv plus a cursor; consuming tokens
//! produces a new view advanced past them, so any number of combinators can
//! hold views into the same pass without copying the strings.
//!
//! Shape classification answers one question only: does a token look like an
//! option name (`-p`, `--port`, `--port=8080`)? Whether a given name is
//! actually registered is the option primitive's business.

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// The conventional end-of-options marker that triggers pass-through capture.
pub const PASSTHROUGH_MARKER: &str = "--";

static OPTION_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^--?[A-Za-z0-9][A-Za-z0-9_-]*$").expect("valid option name pattern"));

/// An immutable view over the remaining command-line tokens.
///
/// Cloning is cheap: the underlying argv is shared, only the cursor differs
/// between views. [`TokenBuffer::advance`] is the only way to move forward and
/// always returns a fresh view.
#[derive(Debug, Clone)]
pub struct TokenBuffer {
    tokens: Arc<[String]>,
    cursor: usize,
}

impl TokenBuffer {
    pub fn new(args: Vec<String>) -> Self {
        TokenBuffer {
            tokens: args.into(),
            cursor: 0,
        }
    }

    /// Convenience constructor for tests and call sites holding `&str` args.
    pub fn from_slice(args: &[&str]) -> Self {
        Self::new(args.iter().map(|s| s.to_string()).collect())
    }

    /// The tokens not yet consumed by this view.
    pub fn remaining(&self) -> &[String] {
        &self.tokens[self.cursor..]
    }

    /// The next unconsumed token, if any.
    pub fn peek(&self) -> Option<&str> {
        self.tokens.get(self.cursor).map(String::as_str)
    }

    /// The token `offset` positions past the cursor.
    pub fn get(&self, offset: usize) -> Option<&str> {
        self.tokens.get(self.cursor + offset).map(String::as_str)
    }

    /// Number of unconsumed tokens.
    pub fn len(&self) -> usize {
        self.tokens.len() - self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// A new view advanced past `n` consumed tokens. Saturates at the end.
    pub fn advance(&self, n: usize) -> TokenBuffer {
        TokenBuffer {
            tokens: Arc::clone(&self.tokens),
            cursor: (self.cursor + n).min(self.tokens.len()),
        }
    }

    /// Absolute cursor position within the original argv.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

/// Does this token have the shape of an option name or inline `name=value`?
///
/// The bare `--` marker is not option-like; it belongs to pass-through capture.
pub fn is_option_like(token: &str) -> bool {
    if token == PASSTHROUGH_MARKER {
        return false;
    }
    OPTION_NAME.is_match(token) || split_inline(token).is_some()
}

/// Split an inline `--name=value` token into its name and value parts.
pub fn split_inline(token: &str) -> Option<(&str, &str)> {
    if !token.starts_with('-') {
        return None;
    }
    let (name, value) = token.split_once('=')?;
    if OPTION_NAME.is_match(name) {
        Some((name, value))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_produces_independent_views() {
        let buffer = TokenBuffer::from_slice(&["--port", "8080", "dev"]);
        let advanced = buffer.advance(2);

        assert_eq!(buffer.peek(), Some("--port"));
        assert_eq!(advanced.peek(), Some("dev"));
        assert_eq!(buffer.len(), 3);
        assert_eq!(advanced.len(), 1);
    }

    #[test]
    fn advance_saturates_at_end() {
        let buffer = TokenBuffer::from_slice(&["a"]);
        let past = buffer.advance(5);
        assert!(past.is_empty());
        assert_eq!(past.cursor(), 1);
    }

    #[test]
    fn option_shapes() {
        assert!(is_option_like("-p"));
        assert!(is_option_like("--port"));
        assert!(is_option_like("--port=8080"));
        assert!(is_option_like("--dry-run"));
        assert!(!is_option_like("--"));
        assert!(!is_option_like("port"));
        assert!(!is_option_like("-"));
        assert!(!is_option_like("8080"));
    }

    #[test]
    fn inline_split() {
        assert_eq!(split_inline("--port=8080"), Some(("--port", "8080")));
        assert_eq!(split_inline("--key="), Some(("--key", "")));
        assert_eq!(split_inline("--port"), None);
        assert_eq!(split_inline("port=1"), None);
    }
}
