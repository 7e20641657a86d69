//! Greedy repetition

use crate::argot::context::Annotations;
use crate::argot::docs::{DocFragments, UsageKind, UsageTerm};
use crate::argot::error::{ErrorKind, Failure};
use crate::argot::message::Message;
use crate::argot::parser::{Attempt, Finalize, Mode, Parser, Suggestions};
use crate::argot::token::TokenBuffer;

/// Repeats the inner parser until it stops progressing; a minimum repeat
/// count is enforced at finalize, the maximum is unbounded.
///
/// When the current instance stops progressing but has consumed tokens, it is
/// rolled into the completed list and a fresh instance takes over, which is
/// what lets a single-use inner parser (an option, say) repeat.
pub struct Multiple<P> {
    inner: P,
    min: usize,
}

pub fn multiple<P: Parser>(inner: P, min: usize) -> Multiple<P> {
    Multiple { inner, min }
}

#[derive(Debug, Clone)]
pub struct MultipleState<S> {
    completed: Vec<S>,
    current: S,
    current_consumed: usize,
}

impl<P: Parser> Parser for Multiple<P> {
    type State = MultipleState<P::State>;
    type Value = Vec<P::Value>;

    fn mode(&self) -> Mode {
        self.inner.mode()
    }

    fn usage(&self) -> Vec<UsageTerm> {
        vec![UsageTerm::new(UsageKind::Multiple {
            terms: self.inner.usage(),
            min: self.min,
        })]
    }

    fn initial(&self) -> Self::State {
        MultipleState {
            completed: Vec::new(),
            current: self.inner.initial(),
            current_consumed: 0,
        }
    }

    fn attempt(&self, state: &Self::State, buffer: &TokenBuffer, ctx: &Annotations) -> Attempt<Self::State> {
        match self.inner.attempt(&state.current, buffer, ctx) {
            Attempt::Progressed {
                state: next,
                consumed,
            } => Attempt::Progressed {
                state: MultipleState {
                    completed: state.completed.clone(),
                    current: next,
                    current_consumed: state.current_consumed + consumed,
                },
                consumed,
            },
            Attempt::Rejected { failure, consumed } if consumed > 0 => {
                Attempt::Rejected { failure, consumed }
            }
            Attempt::Rejected { failure, .. } => {
                if state.current_consumed == 0 {
                    return Attempt::Rejected {
                        failure,
                        consumed: 0,
                    };
                }
                // Current instance is done; see whether a fresh one claims
                // the head token.
                let fresh = self.inner.initial();
                match self.inner.attempt(&fresh, buffer, ctx) {
                    Attempt::Progressed {
                        state: next,
                        consumed,
                    } => {
                        let mut completed = state.completed.clone();
                        completed.push(state.current.clone());
                        Attempt::Progressed {
                            state: MultipleState {
                                completed,
                                current: next,
                                current_consumed: consumed,
                            },
                            consumed,
                        }
                    }
                    Attempt::Rejected {
                        failure: fresh_failure,
                        consumed,
                    } if consumed > 0 => Attempt::Rejected {
                        failure: fresh_failure,
                        consumed,
                    },
                    Attempt::Rejected { .. } => Attempt::Rejected {
                        failure,
                        consumed: 0,
                    },
                }
            }
        }
    }

    fn finalize<'a>(&'a self, state: Self::State, ctx: &'a Annotations) -> Finalize<'a, Vec<P::Value>> {
        let mut instances = state.completed;
        if state.current_consumed > 0 {
            instances.push(state.current);
        }
        if instances.len() < self.min {
            return Finalize::err(Failure::new(
                ErrorKind::UnmetMinimum,
                Message::new()
                    .text("expected at least")
                    .value(self.min.to_string())
                    .text("occurrences but got")
                    .value(instances.len().to_string()),
            ));
        }
        if self.mode() == Mode::Sync {
            let mut values = Vec::with_capacity(instances.len());
            for instance in instances {
                match self.inner.finalize(instance, ctx).expect_ready() {
                    Ok(value) => values.push(value),
                    Err(failure) => return Finalize::err(failure),
                }
            }
            Finalize::ok(values)
        } else {
            Finalize::Deferred(Box::pin(async move {
                let mut values = Vec::with_capacity(instances.len());
                for instance in instances {
                    values.push(self.inner.finalize(instance, ctx).into_future().await?);
                }
                Ok(values)
            }))
        }
    }

    fn suggest<'a>(&'a self, state: &'a Self::State, prefix: &str) -> Suggestions<'a> {
        self.inner.suggest(&state.current, prefix)
    }

    fn doc(&self) -> DocFragments {
        self.inner.doc()
    }
}
