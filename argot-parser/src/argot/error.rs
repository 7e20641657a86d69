//! Failure type and error taxonomy for the matching engine

use crate::argot::message::Message;
use std::fmt;

/// The kinds of terminal failure a parse pass can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No combinator claimed the token.
    UnexpectedToken,
    /// An option name matched but its value token was absent or malformed in place.
    MissingValue,
    /// A required primitive was never supplied.
    MissingRequired,
    /// A value parser rejected a well-formed token.
    Validation,
    /// A single-use option or flag was supplied more than once.
    Duplicate,
    /// A conditional branch key was not recognized.
    UnknownDiscriminator,
    /// A repetition finished below its minimum count.
    UnmetMinimum,
    /// An async-mode tree was driven through a sync entry point (or the
    /// reverse constraint, such as an async conditional discriminator).
    ModeMismatch,
}

impl ErrorKind {
    fn label(self) -> &'static str {
        match self {
            ErrorKind::UnexpectedToken => "unexpected token",
            ErrorKind::MissingValue => "missing value",
            ErrorKind::MissingRequired => "missing required",
            ErrorKind::Validation => "invalid value",
            ErrorKind::Duplicate => "duplicate use",
            ErrorKind::UnknownDiscriminator => "unknown discriminator",
            ErrorKind::UnmetMinimum => "too few occurrences",
            ErrorKind::ModeMismatch => "mode mismatch",
        }
    }
}

/// A terminal parse failure: a taxonomy kind plus a structured message.
///
/// Failures are never bare text. Renderers consume [`Failure::message`] term
/// by term; the `Display` impl is the plain-text fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    kind: ErrorKind,
    message: Message,
}

impl Failure {
    pub fn new(kind: ErrorKind, message: Message) -> Self {
        Failure { kind, message }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn into_message(self) -> Message {
        self.message
    }

    /// Append further terms to the message, keeping the kind.
    pub fn with_message(self, message: Message) -> Self {
        let mut combined = self.message;
        for term in message.terms() {
            combined.push(term.clone());
        }
        Failure {
            kind: self.kind,
            message: combined,
        }
    }

    /// The failure reported when no combinator claims a token.
    pub fn unexpected(token: &str) -> Self {
        Failure::new(
            ErrorKind::UnexpectedToken,
            Message::new()
                .text("unexpected option or argument")
                .value(token),
        )
    }

    /// Can an enclosing Optional/With-default recover from this failure,
    /// given that the inner parser consumed no tokens?
    ///
    /// Only pure absence is recoverable. Validation, missing-value and
    /// duplicate failures describe something the user actually typed and
    /// always propagate.
    pub fn recoverable_when_unconsumed(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::MissingRequired | ErrorKind::UnmetMinimum
        )
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.label(), self.message)
    }
}

impl std::error::Error for Failure {}

/// Result alias used throughout the engine.
pub type ParseResult<T> = Result<T, Failure>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_label() {
        let failure = Failure::unexpected("--bogus");
        assert_eq!(
            failure.to_string(),
            "unexpected token: unexpected option or argument \"--bogus\""
        );
    }

    #[test]
    fn only_absence_is_recoverable() {
        let missing = Failure::new(ErrorKind::MissingRequired, Message::from("absent"));
        let invalid = Failure::new(ErrorKind::Validation, Message::from("bad"));
        assert!(missing.recoverable_when_unconsumed());
        assert!(!invalid.recoverable_when_unconsumed());
    }
}
