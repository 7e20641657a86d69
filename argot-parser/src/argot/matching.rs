//! The matching engine
//!
//! One pass over argv: feed the buffer to the grammar until it stops
//! consuming, then finalize. A rejection anywhere in the loop is the failure
//! of the whole pass. The sync entry points refuse grammars that contain an
//! async value parser; those go through [`parse_async`].

use crate::argot::context::Annotations;
use crate::argot::error::{ErrorKind, Failure, ParseResult};
use crate::argot::message::Message;
use crate::argot::parser::{Attempt, Finalize, Mode, Parser};
use crate::argot::token::TokenBuffer;

/// Drive `parser` over the whole buffer, returning the end state.
fn run<P: Parser>(
    parser: &P,
    buffer: TokenBuffer,
    ctx: &Annotations,
) -> Result<P::State, Failure> {
    let mut state = parser.initial();
    let mut buffer = buffer;
    while !buffer.is_empty() {
        match parser.attempt(&state, &buffer, ctx) {
            Attempt::Progressed {
                state: next,
                consumed,
            } if consumed > 0 => {
                state = next;
                buffer = buffer.advance(consumed);
            }
            // Zero-consumption progress at the engine boundary would loop
            // forever; treat it as the grammar declining the head.
            Attempt::Progressed { .. } => {
                return Err(Failure::unexpected(buffer.peek().unwrap_or("")));
            }
            Attempt::Rejected { failure, .. } => return Err(failure),
        }
    }
    Ok(state)
}

/// Parse the given tokens synchronously with an empty annotation set.
pub fn parse<P: Parser>(parser: &P, args: &[&str]) -> ParseResult<P::Value> {
    parse_with(parser, args, &Annotations::new())
}

/// Parse the given tokens synchronously under the given annotations.
pub fn parse_with<P: Parser>(
    parser: &P,
    args: &[&str],
    ctx: &Annotations,
) -> ParseResult<P::Value> {
    if parser.mode() == Mode::Async {
        return Err(Failure::new(
            ErrorKind::ModeMismatch,
            Message::new().text("grammar contains async value parsers; use the async entry point"),
        ));
    }
    let state = run(parser, TokenBuffer::from_slice(args), ctx)?;
    parser.finalize(state, ctx).expect_ready()
}

/// Parse the given tokens, awaiting deferred value conversion as needed.
///
/// Matching itself is always synchronous; only finalization awaits. Works for
/// purely synchronous grammars too.
pub async fn parse_async<P: Parser>(
    parser: &P,
    args: &[&str],
    ctx: &Annotations,
) -> ParseResult<P::Value> {
    let state = run(parser, TokenBuffer::from_slice(args), ctx)?;
    match parser.finalize(state, ctx) {
        Finalize::Ready(result) => result,
        Finalize::Deferred(future) => future.await,
    }
}
