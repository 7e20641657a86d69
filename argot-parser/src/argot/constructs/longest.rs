//! Longest-match arbitration
//!
//! Every candidate is run against the same buffer position and the one that
//! consumes the most tokens wins. Unlike [`one_of`](super::one_of), which
//! commits to the first nonzero progress, longest arbitration must see how
//! far each candidate can go, so a single attempt drives all candidates to
//! their individual fixed points against private views of the buffer and
//! reports the deepest consumption among candidates that can also finalize
//! from where they stopped. The winner is chosen at finalize: greatest
//! consumption first, declaration order on ties, first successful finalize
//! wins.
//!
//! A candidate that declines its next token after consuming some is a normal
//! stop, still in the running. A candidate that was entered and then broke is
//! out, and if its broken match is the deepest one its failure is the
//! reported failure.

use crate::argot::context::Annotations;
use crate::argot::docs::{DocFragments, UsageKind, UsageTerm};
use crate::argot::error::Failure;
use crate::argot::parser::{Attempt, Boxed, DynState, Finalize, Mode, Parser, Suggestions};
use crate::argot::token::TokenBuffer;

pub struct Longest<T> {
    candidates: Vec<Boxed<T>>,
}

pub fn longest<T: 'static>(candidates: Vec<Boxed<T>>) -> Longest<T> {
    Longest { candidates }
}

#[derive(Clone)]
struct CandidateRun {
    state: DynState,
    consumed: usize,
    failure: Option<Failure>,
}

#[derive(Clone)]
pub struct LongestState {
    runs: Vec<CandidateRun>,
    done: bool,
}

impl<T: 'static> Longest<T> {
    /// Drive one candidate to its fixed point from the given position.
    fn run_candidate(
        &self,
        index: usize,
        buffer: &TokenBuffer,
        ctx: &Annotations,
    ) -> CandidateRun {
        let candidate = &self.candidates[index];
        let mut run = CandidateRun {
            state: candidate.initial(),
            consumed: 0,
            failure: None,
        };
        let mut view = buffer.clone();
        while !view.is_empty() {
            match candidate.attempt(&run.state, &view, ctx) {
                Attempt::Progressed { state, consumed } if consumed > 0 => {
                    run.state = state;
                    run.consumed += consumed;
                    view = view.advance(consumed);
                }
                Attempt::Progressed { .. } => break,
                Attempt::Rejected { failure, consumed } if consumed > 0 => {
                    // Entered and broke: out of the running.
                    run.consumed += consumed;
                    run.failure = Some(failure);
                    break;
                }
                // Clean decline; where this run stopped is arbitrated later.
                Attempt::Rejected { .. } => break,
            }
        }
        run
    }

    fn fresh_runs(&self) -> Vec<CandidateRun> {
        self.candidates
            .iter()
            .map(|c| CandidateRun {
                state: c.initial(),
                consumed: 0,
                failure: None,
            })
            .collect()
    }

    /// Candidate indices in arbitration order: deepest consumption first,
    /// declaration order on ties.
    fn arbitration_order(runs: &[CandidateRun]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..runs.len()).collect();
        order.sort_by_key(|&i| std::cmp::Reverse(runs[i].consumed));
        order
    }
}

impl<T: 'static> Parser for Longest<T> {
    type State = LongestState;
    type Value = T;

    fn mode(&self) -> Mode {
        self.candidates
            .iter()
            .fold(Mode::Sync, |mode, c| mode.combine(c.mode()))
    }

    fn usage(&self) -> Vec<UsageTerm> {
        vec![UsageTerm::new(UsageKind::Exclusive {
            groups: self.candidates.iter().map(|c| c.usage()).collect(),
        })]
    }

    fn initial(&self) -> LongestState {
        LongestState {
            runs: Vec::new(),
            done: false,
        }
    }

    fn attempt(&self, state: &LongestState, buffer: &TokenBuffer, ctx: &Annotations) -> Attempt<LongestState> {
        if state.done {
            return Attempt::Rejected {
                failure: Failure::unexpected(buffer.peek().unwrap_or("")),
                consumed: 0,
            };
        }

        let runs: Vec<CandidateRun> = (0..self.candidates.len())
            .map(|i| self.run_candidate(i, buffer, ctx))
            .collect();

        // A survivor only gets to claim its consumption if it can also
        // finalize; otherwise a demoted winner would leave the engine past
        // tokens the eventual winner never matched. Deferred finalization
        // cannot be consulted here, so async trees keep the raw maximum.
        let sync = self.mode() == Mode::Sync;
        let finalized_max = runs
            .iter()
            .enumerate()
            .filter(|(_, run)| run.failure.is_none())
            .filter(|(i, run)| {
                !sync
                    || self.candidates[*i]
                        .finalize(run.state.clone(), ctx)
                        .expect_ready()
                        .is_ok()
            })
            .map(|(_, run)| run.consumed)
            .max();
        // Every survivor breaks at finalize: keep the deepest so its own
        // failure is the one reported.
        let best_survivor = finalized_max.or_else(|| {
            runs.iter()
                .filter(|run| run.failure.is_none())
                .map(|run| run.consumed)
                .max()
        });
        let best_broken = runs
            .iter()
            .filter(|run| run.failure.is_some())
            .max_by_key(|run| run.consumed);

        match (best_survivor, best_broken) {
            // The deepest match broke: that failure is definitive, with its
            // consumption, so the enclosing boundary treats it as claimed.
            (survived, Some(broken)) if survived.unwrap_or(0) < broken.consumed => {
                Attempt::Rejected {
                    failure: broken.failure.clone().unwrap_or_else(|| {
                        Failure::unexpected(buffer.peek().unwrap_or(""))
                    }),
                    consumed: broken.consumed,
                }
            }
            (Some(0), _) | (None, None) => Attempt::Rejected {
                failure: Failure::unexpected(buffer.peek().unwrap_or("")),
                consumed: 0,
            },
            (Some(consumed), _) => Attempt::Progressed {
                state: LongestState { runs, done: true },
                consumed,
            },
            (None, Some(_)) => unreachable!("broken run handled above"),
        }
    }

    fn finalize<'a>(&'a self, state: LongestState, ctx: &'a Annotations) -> Finalize<'a, T> {
        // A pass over an empty buffer never reaches `attempt`; arbitrate over
        // the candidates' initial states instead.
        let runs = if state.runs.is_empty() {
            self.fresh_runs()
        } else {
            state.runs
        };
        let order = Self::arbitration_order(&runs);

        if self.mode() == Mode::Sync {
            let mut first_failure: Option<Failure> = None;
            for &i in &order {
                if let Some(failure) = &runs[i].failure {
                    first_failure.get_or_insert_with(|| failure.clone());
                    continue;
                }
                match self.candidates[i]
                    .finalize(runs[i].state.clone(), ctx)
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
                for &i in &order {
                    if let Some(failure) = &runs[i].failure {
                        first_failure.get_or_insert_with(|| failure.clone());
                        continue;
                    }
                    match self.candidates[i]
                        .finalize(runs[i].state.clone(), ctx)
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

    fn suggest<'a>(&'a self, state: &'a LongestState, prefix: &str) -> Suggestions<'a> {
        if state.runs.is_empty() {
            let collected: Vec<_> = self
                .fresh_runs()
                .iter()
                .enumerate()
                .flat_map(|(i, run)| {
                    self.candidates[i].suggest(&run.state, prefix).collect::<Vec<_>>()
                })
                .collect();
            return Box::new(collected.into_iter());
        }
        let prefix = prefix.to_string();
        Box::new(
            self.candidates
                .iter()
                .zip(state.runs.iter())
                .filter(|(_, run)| run.failure.is_none())
                .flat_map(move |(candidate, run)| candidate.suggest(&run.state, &prefix)),
        )
    }

    fn doc(&self) -> DocFragments {
        self.candidates
            .iter()
            .fold(DocFragments::default(), |acc, c| acc.merge(c.doc()))
    }
}
