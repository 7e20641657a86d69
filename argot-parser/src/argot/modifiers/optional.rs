//! Optional and with-default wrappers
//!
//! Recovery is consumption-aware: absence (nothing of the inner parser was
//! ever supplied) becomes `None` or the default, while a partially-supplied
//! inner parser that failed validation stays a real error.

use crate::argot::context::Annotations;
use crate::argot::docs::{DocFragments, UsageKind, UsageTerm};
use crate::argot::parser::{Attempt, Finalize, Mode, Parser, Suggestions};
use crate::argot::token::TokenBuffer;

/// Succeeds with `None` when the inner parser consumed nothing and reported
/// pure absence at finalize.
pub struct Optional<P> {
    inner: P,
}

pub fn optional<P: Parser>(inner: P) -> Optional<P> {
    Optional { inner }
}

#[derive(Debug, Clone)]
pub struct TrackedState<S> {
    inner: S,
    consumed: usize,
}

fn delegate_attempt<P: Parser>(
    inner: &P,
    state: &TrackedState<P::State>,
    buffer: &TokenBuffer,
    ctx: &Annotations,
) -> Attempt<TrackedState<P::State>> {
    match inner.attempt(&state.inner, buffer, ctx) {
        Attempt::Progressed {
            state: next,
            consumed,
        } => Attempt::Progressed {
            state: TrackedState {
                inner: next,
                consumed: state.consumed + consumed,
            },
            consumed,
        },
        Attempt::Rejected { failure, consumed } => Attempt::Rejected { failure, consumed },
    }
}

impl<P: Parser> Parser for Optional<P> {
    type State = TrackedState<P::State>;
    type Value = Option<P::Value>;

    fn mode(&self) -> Mode {
        self.inner.mode()
    }

    fn priority(&self) -> i16 {
        self.inner.priority()
    }

    fn usage(&self) -> Vec<UsageTerm> {
        vec![UsageTerm::new(UsageKind::Optional {
            terms: self.inner.usage(),
        })]
    }

    fn initial(&self) -> Self::State {
        TrackedState {
            inner: self.inner.initial(),
            consumed: 0,
        }
    }

    fn attempt(&self, state: &Self::State, buffer: &TokenBuffer, ctx: &Annotations) -> Attempt<Self::State> {
        delegate_attempt(&self.inner, state, buffer, ctx)
    }

    fn finalize<'a>(&'a self, state: Self::State, ctx: &'a Annotations) -> Finalize<'a, Option<P::Value>> {
        let consumed = state.consumed;
        match self.inner.finalize(state.inner, ctx) {
            Finalize::Ready(Ok(value)) => Finalize::ok(Some(value)),
            Finalize::Ready(Err(failure)) => {
                if consumed == 0 && failure.recoverable_when_unconsumed() {
                    Finalize::ok(None)
                } else {
                    Finalize::err(failure)
                }
            }
            Finalize::Deferred(future) => Finalize::Deferred(Box::pin(async move {
                match future.await {
                    Ok(value) => Ok(Some(value)),
                    Err(failure) if consumed == 0 && failure.recoverable_when_unconsumed() => {
                        Ok(None)
                    }
                    Err(failure) => Err(failure),
                }
            })),
        }
    }

    fn suggest<'a>(&'a self, state: &'a Self::State, prefix: &str) -> Suggestions<'a> {
        self.inner.suggest(&state.inner, prefix)
    }

    fn doc(&self) -> DocFragments {
        self.inner.doc()
    }
}

/// Like [`Optional`] but substitutes a caller-supplied default.
pub struct WithDefault<P: Parser> {
    inner: P,
    default: P::Value,
    shown: Option<String>,
}

pub fn with_default<P: Parser>(inner: P, default: P::Value) -> WithDefault<P>
where
    P::Value: Clone,
{
    WithDefault {
        inner,
        default,
        shown: None,
    }
}

impl<P: Parser> WithDefault<P> {
    /// How the default renders in documentation entries.
    pub fn shown_as(mut self, shown: impl Into<String>) -> Self {
        self.shown = Some(shown.into());
        self
    }
}

impl<P: Parser> Parser for WithDefault<P>
where
    P::Value: Clone,
{
    type State = TrackedState<P::State>;
    type Value = P::Value;

    fn mode(&self) -> Mode {
        self.inner.mode()
    }

    fn priority(&self) -> i16 {
        self.inner.priority()
    }

    fn usage(&self) -> Vec<UsageTerm> {
        vec![UsageTerm::new(UsageKind::Optional {
            terms: self.inner.usage(),
        })]
    }

    fn initial(&self) -> Self::State {
        TrackedState {
            inner: self.inner.initial(),
            consumed: 0,
        }
    }

    fn attempt(&self, state: &Self::State, buffer: &TokenBuffer, ctx: &Annotations) -> Attempt<Self::State> {
        delegate_attempt(&self.inner, state, buffer, ctx)
    }

    fn finalize<'a>(&'a self, state: Self::State, ctx: &'a Annotations) -> Finalize<'a, P::Value> {
        let consumed = state.consumed;
        let default = self.default.clone();
        match self.inner.finalize(state.inner, ctx) {
            Finalize::Ready(Ok(value)) => Finalize::ok(value),
            Finalize::Ready(Err(failure)) => {
                if consumed == 0 && failure.recoverable_when_unconsumed() {
                    Finalize::ok(default)
                } else {
                    Finalize::err(failure)
                }
            }
            Finalize::Deferred(future) => Finalize::Deferred(Box::pin(async move {
                match future.await {
                    Ok(value) => Ok(value),
                    Err(failure) if consumed == 0 && failure.recoverable_when_unconsumed() => {
                        Ok(default)
                    }
                    Err(failure) => Err(failure),
                }
            })),
        }
    }

    fn suggest<'a>(&'a self, state: &'a Self::State, prefix: &str) -> Suggestions<'a> {
        self.inner.suggest(&state.inner, prefix)
    }

    fn doc(&self) -> DocFragments {
        let mut fragments = self.inner.doc();
        if let Some(shown) = &self.shown {
            if let Some(entry) = fragments
                .sections
                .iter_mut()
                .flat_map(|s| s.entries.iter_mut())
                .next()
            {
                entry.default = Some(shown.clone());
            }
        }
        fragments
    }
}
