//! Thin wrappers that adjust metadata without touching matching

use crate::argot::context::Annotations;
use crate::argot::docs::{DocFragments, UsageTerm};
use crate::argot::parser::{Attempt, Finalize, Mode, Parser, Suggestions};
use crate::argot::token::TokenBuffer;

/// Overrides the priority used to order sibling attempts in alternation.
pub struct Prioritized<P> {
    inner: P,
    priority: i16,
}

pub fn with_priority<P: Parser>(inner: P, priority: i16) -> Prioritized<P> {
    Prioritized { inner, priority }
}

impl<P: Parser> Parser for Prioritized<P> {
    type State = P::State;
    type Value = P::Value;

    fn mode(&self) -> Mode {
        self.inner.mode()
    }

    fn priority(&self) -> i16 {
        self.priority
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

    fn finalize<'a>(&'a self, state: P::State, ctx: &'a Annotations) -> Finalize<'a, P::Value> {
        self.inner.finalize(state, ctx)
    }

    fn suggest<'a>(&'a self, state: &'a P::State, prefix: &str) -> Suggestions<'a> {
        self.inner.suggest(state, prefix)
    }

    fn doc(&self) -> DocFragments {
        self.inner.doc()
    }
}

/// Suppresses the inner parser from rendered usage and doc pages while
/// leaving matching and suggestion fully active.
pub struct Hidden<P> {
    inner: P,
}

pub fn hidden<P: Parser>(inner: P) -> Hidden<P> {
    Hidden { inner }
}

impl<P: Parser> Parser for Hidden<P> {
    type State = P::State;
    type Value = P::Value;

    fn mode(&self) -> Mode {
        self.inner.mode()
    }

    fn priority(&self) -> i16 {
        self.inner.priority()
    }

    fn usage(&self) -> Vec<UsageTerm> {
        self.inner.usage().into_iter().map(UsageTerm::hide).collect()
    }

    fn initial(&self) -> P::State {
        self.inner.initial()
    }

    fn attempt(&self, state: &P::State, buffer: &TokenBuffer, ctx: &Annotations) -> Attempt<P::State> {
        self.inner.attempt(state, buffer, ctx)
    }

    fn finalize<'a>(&'a self, state: P::State, ctx: &'a Annotations) -> Finalize<'a, P::Value> {
        self.inner.finalize(state, ctx)
    }

    fn suggest<'a>(&'a self, state: &'a P::State, prefix: &str) -> Suggestions<'a> {
        self.inner.suggest(state, prefix)
    }

    fn doc(&self) -> DocFragments {
        let mut fragments = self.inner.doc();
        for section in &mut fragments.sections {
            for entry in &mut section.entries {
                entry.term.hidden = true;
            }
        }
        fragments
    }
}
