//! Non-emptiness constraint
//!
//! Rejects at finalize when the inner parser's aggregate consumption is zero.
//! This distinguishes "nothing was supplied, fall back elsewhere" from
//! "something was supplied, even if defaults fill the rest", which is what
//! lets longest-match arbitration demote an all-defaults branch.

use crate::argot::context::Annotations;
use crate::argot::docs::{DocFragments, UsageTerm};
use crate::argot::error::{ErrorKind, Failure};
use crate::argot::message::Message;
use crate::argot::parser::{Attempt, Finalize, Mode, Parser, Suggestions};
use crate::argot::token::TokenBuffer;

pub struct NonEmpty<P> {
    inner: P,
}

pub fn non_empty<P: Parser>(inner: P) -> NonEmpty<P> {
    NonEmpty { inner }
}

#[derive(Debug, Clone)]
pub struct NonEmptyState<S> {
    inner: S,
    consumed: usize,
}

impl<P: Parser> Parser for NonEmpty<P> {
    type State = NonEmptyState<P::State>;
    type Value = P::Value;

    fn mode(&self) -> Mode {
        self.inner.mode()
    }

    fn priority(&self) -> i16 {
        self.inner.priority()
    }

    fn usage(&self) -> Vec<UsageTerm> {
        self.inner.usage()
    }

    fn initial(&self) -> Self::State {
        NonEmptyState {
            inner: self.inner.initial(),
            consumed: 0,
        }
    }

    fn attempt(&self, state: &Self::State, buffer: &TokenBuffer, ctx: &Annotations) -> Attempt<Self::State> {
        match self.inner.attempt(&state.inner, buffer, ctx) {
            Attempt::Progressed {
                state: next,
                consumed,
            } => Attempt::Progressed {
                state: NonEmptyState {
                    inner: next,
                    consumed: state.consumed + consumed,
                },
                consumed,
            },
            Attempt::Rejected { failure, consumed } => Attempt::Rejected { failure, consumed },
        }
    }

    fn finalize<'a>(&'a self, state: Self::State, ctx: &'a Annotations) -> Finalize<'a, P::Value> {
        if state.consumed == 0 {
            return Finalize::err(Failure::new(
                ErrorKind::UnmetMinimum,
                Message::new().text("nothing was supplied"),
            ));
        }
        self.inner.finalize(state.inner, ctx)
    }

    fn suggest<'a>(&'a self, state: &'a Self::State, prefix: &str) -> Suggestions<'a> {
        self.inner.suggest(&state.inner, prefix)
    }

    fn doc(&self) -> DocFragments {
        self.inner.doc()
    }
}
