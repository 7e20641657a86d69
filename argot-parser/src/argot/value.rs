//! Value parser contract
//!
//! Value parsers convert a single string token into a typed value, or a
//! structured [`Message`] describing why they could not. They are pure and
//! stateless; an asynchronous one (external lookup) reports `Mode::Async` and
//! returns a deferred result, which forces the whole parser tree containing
//! it into async mode.
//!
//! The stock parsers live in [`stock`]; regex-backed ones in [`pattern`];
//! closures and async lookups in [`custom`].

use crate::argot::message::Message;
use crate::argot::parser::Mode;
use crate::argot::suggest::Suggestion;
use std::future::Future;
use std::pin::Pin;

pub mod custom;
pub mod pattern;
pub mod stock;

pub use custom::{custom, custom_async, AsyncValue, CustomValue};
pub use pattern::{pattern, PatternValue};
pub use stock::{choice, integer, path, string, ChoiceValue, IntegerValue, PathValue, StringValue};

/// Boxed future used for deferred results throughout the engine.
pub type BoxedFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Outcome of parsing one token: available now, or once awaited.
pub enum ValueResult<'a, T> {
    Ready(Result<T, Message>),
    Deferred(BoxedFuture<'a, Result<T, Message>>),
}

impl<'a, T: 'a> ValueResult<'a, T> {
    /// Resolve a result that must be synchronous. A deferred result here is a
    /// contract violation by a parser that reported `Mode::Sync`.
    pub fn expect_ready(self) -> Result<T, Message> {
        match self {
            ValueResult::Ready(result) => result,
            ValueResult::Deferred(_) => Err(Message::new()
                .text("async value parser driven through a sync path")),
        }
    }

    pub fn into_future(self) -> BoxedFuture<'a, Result<T, Message>> {
        match self {
            ValueResult::Ready(result) => Box::pin(std::future::ready(result)),
            ValueResult::Deferred(future) => future,
        }
    }
}

/// Converts one string token into a typed value.
pub trait ValueParser {
    type Output: 'static;

    /// Display placeholder for this value's expected type, e.g. `PORT`.
    fn metavar(&self) -> &str;

    fn mode(&self) -> Mode {
        Mode::Sync
    }

    fn parse(&self, token: &str) -> ValueResult<'_, Self::Output>;

    /// Render a value back into the token that would produce it.
    fn format(&self, value: &Self::Output) -> String;

    /// Completion candidates for a partial token. Finite, fresh per call.
    fn suggest(&self, _prefix: &str) -> Box<dyn Iterator<Item = Suggestion> + '_> {
        Box::new(std::iter::empty())
    }
}
