//! Result transformation

use crate::argot::context::Annotations;
use crate::argot::docs::{DocFragments, UsageTerm};
use crate::argot::parser::{Attempt, Finalize, Mode, Parser, Suggestions};
use crate::argot::token::TokenBuffer;

/// Transforms the successful value; consumption and failure behavior of the
/// inner parser are untouched.
pub struct Map<P, F> {
    inner: P,
    f: F,
}

pub fn map<P, F, U>(inner: P, f: F) -> Map<P, F>
where
    P: Parser,
    F: Fn(P::Value) -> U,
    U: 'static,
{
    Map { inner, f }
}

impl<P, F, U> Parser for Map<P, F>
where
    P: Parser,
    F: Fn(P::Value) -> U,
    U: 'static,
{
    type State = P::State;
    type Value = U;

    fn mode(&self) -> Mode {
        self.inner.mode()
    }

    fn priority(&self) -> i16 {
        self.inner.priority()
    }

    fn usage(&self) -> Vec<UsageTerm> {
        self.inner.usage()
    }

    fn initial(&self) -> P::State {
        self.inner.initial()
    }

    fn attempt(&self, state: &P::State, buffer: &TokenBuffer, ctx: &Annotations) -> Attempt<P::State> {
        self.inner.attempt(state, buffer, ctx)
    }

    fn finalize<'a>(&'a self, state: P::State, ctx: &'a Annotations) -> Finalize<'a, U> {
        self.inner.finalize(state, ctx).map(&self.f)
    }

    fn suggest<'a>(&'a self, state: &'a P::State, prefix: &str) -> Suggestions<'a> {
        self.inner.suggest(state, prefix)
    }

    fn doc(&self) -> DocFragments {
        self.inner.doc()
    }
}
