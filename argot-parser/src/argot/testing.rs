//! Test support for grammar assertions
//!
//! Integration tests across this crate drive grammars through the same entry
//! points production callers use, then assert on the failure taxonomy rather
//! than on rendered text. Matching on [`ErrorKind`] keeps tests stable when
//! message wording evolves; the helpers here make those assertions terse.

use crate::argot::error::{ErrorKind, Failure, ParseResult};
use crate::argot::token::TokenBuffer;

/// Build a [`TokenBuffer`] from string literals.
pub fn argv(tokens: &[&str]) -> TokenBuffer {
    TokenBuffer::from_slice(tokens)
}

/// Assert a parse failed with the given kind, returning the failure for
/// further message assertions.
pub fn expect_failure<T: std::fmt::Debug>(result: ParseResult<T>, kind: ErrorKind) -> Failure {
    match result {
        Ok(value) => panic!("expected {:?} failure, parsed {:?}", kind, value),
        Err(failure) => {
            assert_eq!(
                failure.kind(),
                kind,
                "wrong failure kind: {}",
                failure
            );
            failure
        }
    }
}
