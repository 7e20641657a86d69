//! Discriminated branching
//!
//! First fully resolves a discriminator sub-parser to a concrete value, then
//! selects the one branch registered for that value and delegates the rest of
//! the buffer to it. Unknown discriminator values are a hard failure before
//! any branch is attempted. Branch selection needs the discriminator's value
//! during the pass, so the discriminator must be synchronous.

use crate::argot::context::Annotations;
use crate::argot::docs::{DocFragments, UsageKind, UsageTerm};
use crate::argot::error::{ErrorKind, Failure};
use crate::argot::message::Message;
use crate::argot::parser::{Attempt, Boxed, DynState, Finalize, Mode, Parser, Suggestions};
use crate::argot::token::TokenBuffer;
use std::fmt::Debug;

pub struct Conditional<D, T> {
    discriminator: Boxed<D>,
    branches: Vec<(D, Boxed<T>)>,
}

pub fn conditional<D, T>(discriminator: Boxed<D>, branches: Vec<(D, Boxed<T>)>) -> Conditional<D, T>
where
    D: PartialEq + Debug + 'static,
    T: 'static,
{
    Conditional {
        discriminator,
        branches,
    }
}

#[derive(Clone)]
pub enum ConditionalState {
    Discriminating { discriminator: DynState },
    Dispatched { branch: usize, state: DynState },
}

impl<D, T> Conditional<D, T>
where
    D: PartialEq + Debug + 'static,
    T: 'static,
{
    /// Resolve the discriminator state to a branch index. Called once the
    /// discriminator stops progressing, and again at finalize if the pass
    /// ended mid-discrimination.
    fn select(&self, discriminator_state: DynState, ctx: &Annotations) -> Result<usize, Failure> {
        if self.discriminator.mode() == Mode::Async {
            return Err(Failure::new(
                ErrorKind::ModeMismatch,
                Message::new().text("conditional discriminator must be synchronous"),
            ));
        }
        let value = self
            .discriminator
            .finalize(discriminator_state, ctx)
            .expect_ready()?;
        self.branches
            .iter()
            .position(|(key, _)| *key == value)
            .ok_or_else(|| {
                Failure::new(
                    ErrorKind::UnknownDiscriminator,
                    Message::new()
                        .text("unrecognized value")
                        .value(format!("{:?}", value)),
                )
            })
    }
}

impl<D, T> Parser for Conditional<D, T>
where
    D: PartialEq + Debug + 'static,
    T: 'static,
{
    type State = ConditionalState;
    type Value = T;

    fn mode(&self) -> Mode {
        self.branches
            .iter()
            .fold(self.discriminator.mode(), |mode, (_, b)| {
                mode.combine(b.mode())
            })
    }

    fn usage(&self) -> Vec<UsageTerm> {
        let mut terms = self.discriminator.usage();
        terms.push(UsageTerm::new(UsageKind::Exclusive {
            groups: self.branches.iter().map(|(_, b)| b.usage()).collect(),
        }));
        terms
    }

    fn initial(&self) -> ConditionalState {
        ConditionalState::Discriminating {
            discriminator: self.discriminator.initial(),
        }
    }

    fn attempt(&self, state: &ConditionalState, buffer: &TokenBuffer, ctx: &Annotations) -> Attempt<ConditionalState> {
        match state {
            ConditionalState::Discriminating { discriminator } => {
                match self.discriminator.attempt(discriminator, buffer, ctx) {
                    Attempt::Progressed {
                        state: next,
                        consumed,
                    } if consumed > 0 => Attempt::Progressed {
                        state: ConditionalState::Discriminating {
                            discriminator: next,
                        },
                        consumed,
                    },
                    Attempt::Rejected { failure, consumed } if consumed > 0 => {
                        Attempt::Rejected { failure, consumed }
                    }
                    // The discriminator stopped progressing: resolve it and
                    // hand the same buffer position to the branch.
                    _ => match self.select(discriminator.clone(), ctx) {
                        Err(failure) => Attempt::Rejected {
                            failure,
                            consumed: 0,
                        },
                        Ok(branch) => {
                            let branch_parser = &self.branches[branch].1;
                            match branch_parser.attempt(&branch_parser.initial(), buffer, ctx) {
                                Attempt::Progressed {
                                    state: next,
                                    consumed,
                                } => Attempt::Progressed {
                                    state: ConditionalState::Dispatched {
                                        branch,
                                        state: next,
                                    },
                                    consumed,
                                },
                                Attempt::Rejected { failure, consumed } => {
                                    Attempt::Rejected { failure, consumed }
                                }
                            }
                        }
                    },
                }
            }
            ConditionalState::Dispatched { branch, state } => {
                match self.branches[*branch].1.attempt(state, buffer, ctx) {
                    Attempt::Progressed {
                        state: next,
                        consumed,
                    } => Attempt::Progressed {
                        state: ConditionalState::Dispatched {
                            branch: *branch,
                            state: next,
                        },
                        consumed,
                    },
                    Attempt::Rejected { failure, consumed } => {
                        Attempt::Rejected { failure, consumed }
                    }
                }
            }
        }
    }

    fn finalize<'a>(&'a self, state: ConditionalState, ctx: &'a Annotations) -> Finalize<'a, T> {
        match state {
            ConditionalState::Discriminating { discriminator } => {
                match self.select(discriminator, ctx) {
                    Err(failure) => Finalize::err(failure),
                    Ok(branch) => {
                        let branch_parser = &self.branches[branch].1;
                        branch_parser.finalize(branch_parser.initial(), ctx)
                    }
                }
            }
            ConditionalState::Dispatched { branch, state } => {
                self.branches[branch].1.finalize(state, ctx)
            }
        }
    }

    fn suggest<'a>(&'a self, state: &'a ConditionalState, prefix: &str) -> Suggestions<'a> {
        match state {
            // Branches behind an unresolved discriminator are unreachable
            // and yield nothing.
            ConditionalState::Discriminating { discriminator } => {
                self.discriminator.suggest(discriminator, prefix)
            }
            ConditionalState::Dispatched { branch, state } => {
                self.branches[*branch].1.suggest(state, prefix)
            }
        }
    }

    fn doc(&self) -> DocFragments {
        self.branches
            .iter()
            .fold(self.discriminator.doc(), |acc, (_, b)| acc.merge(b.doc()))
    }
}
