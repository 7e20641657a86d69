//! Exclusive alternation
//!
//! Alternatives are attempted in declared order with priority override:
//! higher declared priority goes first, ties keep declaration order. The
//! first alternative to make nonzero progress is committed to. A rejection
//! that consumed nothing is silently skipped; a rejection that consumed
//! tokens is the definitive failure of the whole alternation. Once
//! committed, the engine does not guess again.

use crate::argot::constructs::note_pending;
use crate::argot::context::Annotations;
use crate::argot::docs::{DocFragments, UsageKind, UsageTerm};
use crate::argot::error::Failure;
use crate::argot::parser::{
    Attempt, Boxed, DynState, Finalize, Mode, Parser, Suggestions,
};
use crate::argot::token::TokenBuffer;

pub struct OneOf<T> {
    alternatives: Vec<Boxed<T>>,
    // Indices in attempt order: priority descending, declaration order on ties.
    order: Vec<usize>,
}

pub fn one_of<T: 'static>(alternatives: Vec<Boxed<T>>) -> OneOf<T> {
    let mut order: Vec<usize> = (0..alternatives.len()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse(alternatives[i].priority()));
    OneOf {
        alternatives,
        order,
    }
}

#[derive(Clone)]
pub struct OneOfState {
    states: Vec<DynState>,
    committed: Option<usize>,
}

impl<T: 'static> Parser for OneOf<T> {
    type State = OneOfState;
    type Value = T;

    fn mode(&self) -> Mode {
        self.alternatives
            .iter()
            .fold(Mode::Sync, |mode, alt| mode.combine(alt.mode()))
    }

    fn usage(&self) -> Vec<UsageTerm> {
        vec![UsageTerm::new(UsageKind::Exclusive {
            groups: self.alternatives.iter().map(|alt| alt.usage()).collect(),
        })]
    }

    fn initial(&self) -> OneOfState {
        OneOfState {
            states: self.alternatives.iter().map(|alt| alt.initial()).collect(),
            committed: None,
        }
    }

    fn attempt(&self, state: &OneOfState, buffer: &TokenBuffer, ctx: &Annotations) -> Attempt<OneOfState> {
        if let Some(i) = state.committed {
            return match self.alternatives[i].attempt(&state.states[i], buffer, ctx) {
                Attempt::Progressed {
                    state: next,
                    consumed,
                } => {
                    let mut states = state.states.clone();
                    states[i] = next;
                    Attempt::Progressed {
                        state: OneOfState {
                            states,
                            committed: Some(i),
                        },
                        consumed,
                    }
                }
                Attempt::Rejected { failure, consumed } => Attempt::Rejected { failure, consumed },
            };
        }

        let mut pending: Option<Failure> = None;
        for &i in &self.order {
            match self.alternatives[i].attempt(&state.states[i], buffer, ctx) {
                Attempt::Progressed {
                    state: next,
                    consumed,
                } if consumed > 0 => {
                    let mut states = state.states.clone();
                    states[i] = next;
                    return Attempt::Progressed {
                        state: OneOfState {
                            states,
                            committed: Some(i),
                        },
                        consumed,
                    };
                }
                Attempt::Progressed { .. } => {}
                Attempt::Rejected { failure, consumed } if consumed > 0 => {
                    // Entered and failed: no other alternative is tried.
                    return Attempt::Rejected { failure, consumed };
                }
                Attempt::Rejected { failure, .. } => note_pending(&mut pending, failure),
            }
        }
        let failure =
            pending.unwrap_or_else(|| Failure::unexpected(buffer.peek().unwrap_or("")));
        Attempt::Rejected {
            failure,
            consumed: 0,
        }
    }

    fn finalize<'a>(&'a self, state: OneOfState, ctx: &'a Annotations) -> Finalize<'a, T> {
        if let Some(i) = state.committed {
            let branch_state = state.states[i].clone();
            return self.alternatives[i].finalize(branch_state, ctx);
        }
        // Nothing committed: take the first alternative (in attempt order)
        // that finalizes successfully, otherwise the first failure.
        let states = state.states;
        if self.mode() == Mode::Sync {
            let mut first_failure: Option<Failure> = None;
            for &i in &self.order {
                match self.alternatives[i]
                    .finalize(states[i].clone(), ctx)
                    .expect_ready()
                {
                    Ok(value) => return Finalize::ok(value),
                    Err(failure) => {
                        first_failure.get_or_insert(failure);
                    }
                }
            }
            Finalize::err(first_failure.unwrap_or_else(|| Failure::unexpected("")))
        } else {
            Finalize::Deferred(Box::pin(async move {
                let mut first_failure: Option<Failure> = None;
                for &i in &self.order {
                    match self.alternatives[i]
                        .finalize(states[i].clone(), ctx)
                        .into_future()
                        .await
                    {
                        Ok(value) => return Ok(value),
                        Err(failure) => {
                            first_failure.get_or_insert(failure);
                        }
                    }
                }
                Err(first_failure.unwrap_or_else(|| Failure::unexpected("")))
            }))
        }
    }

    fn suggest<'a>(&'a self, state: &'a OneOfState, prefix: &str) -> Suggestions<'a> {
        match state.committed {
            Some(i) => self.alternatives[i].suggest(&state.states[i], prefix),
            None => {
                let prefix = prefix.to_string();
                Box::new(self.order.iter().flat_map(move |&i| {
                    self.alternatives[i].suggest(&state.states[i], &prefix)
                }))
            }
        }
    }

    fn doc(&self) -> DocFragments {
        self.alternatives
            .iter()
            .fold(DocFragments::default(), |acc, alt| acc.merge(alt.doc()))
    }
}
