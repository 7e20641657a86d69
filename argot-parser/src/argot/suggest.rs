//! Completion suggestions
//!
//! Suggestions are structural hints for a completion front end, not rendered
//! text. The engine walk in [`complete`] replays a partial argv against a
//! parser to reach the live match state, then asks the tree for candidates at
//! the trailing prefix. Reachability follows the matching engine's own
//! precedence: a committed alternation offers only its committed branch, an
//! unresolved discriminator hides every branch behind it.

use crate::argot::context::Annotations;
use crate::argot::parser::{Attempt, Parser};
use crate::argot::token::TokenBuffer;
use serde::Serialize;

/// One completion candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Suggestion {
    /// A literal token to insert, with an optional description for rich
    /// front ends.
    Literal {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// Defer to filesystem completion, optionally narrowed.
    File {
        #[serde(skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
        // `kind` would collide with the variant tag once serialized.
        #[serde(rename = "file_kind", skip_serializing_if = "Option::is_none")]
        kind: Option<FileKind>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        extensions: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    File,
    Directory,
    Any,
}

impl Suggestion {
    pub fn literal(text: impl Into<String>) -> Self {
        Suggestion::Literal {
            text: text.into(),
            description: None,
        }
    }

    pub fn literal_with(text: impl Into<String>, description: impl Into<String>) -> Self {
        Suggestion::Literal {
            text: text.into(),
            description: Some(description.into()),
        }
    }

    /// The inserted text for literals, used for prefix filtering and
    /// deduplication.
    pub fn text(&self) -> Option<&str> {
        match self {
            Suggestion::Literal { text, .. } => Some(text),
            Suggestion::File { .. } => None,
        }
    }
}

/// Completion candidates for `prefix`, given the tokens already typed.
///
/// The replay is best-effort: it advances the parser as far as the typed
/// tokens allow and stops at the first rejection, so a trailing half-typed
/// option still yields name suggestions from the state before it.
pub fn complete<P: Parser>(
    parser: &P,
    args: &[String],
    prefix: &str,
    ctx: &Annotations,
) -> Vec<Suggestion> {
    let mut state = parser.initial();
    let mut buffer = TokenBuffer::new(args.to_vec());

    while !buffer.is_empty() {
        match parser.attempt(&state, &buffer, ctx) {
            Attempt::Progressed { state: next, consumed } if consumed > 0 => {
                state = next;
                buffer = buffer.advance(consumed);
            }
            _ => break,
        }
    }

    let mut seen = std::collections::HashSet::new();
    parser
        .suggest(&state, prefix)
        .filter(|s| s.text().map_or(true, |t| t.starts_with(prefix)))
        .filter(|s| match s.text() {
            Some(t) => seen.insert(t.to_string()),
            None => true,
        })
        .collect()
}
