//! Merging independently-defined aggregates
//!
//! Lets a grammar be assembled from reusable pieces: every part is an
//! [`Object`] with its own fields, and the merge offers each token to every
//! part as though all their fields had been declared in one object. The
//! finalized records are folded into a single record; on a field-name
//! collision the earlier part keeps the value.

use crate::argot::constructs::note_pending;
use crate::argot::constructs::object::{Object, ObjectState, Record};
use crate::argot::context::Annotations;
use crate::argot::docs::{DocFragments, UsageTerm};
use crate::argot::error::Failure;
use crate::argot::parser::{Attempt, Finalize, Mode, Parser, Suggestions};
use crate::argot::token::TokenBuffer;

pub struct Merge {
    parts: Vec<Object>,
}

pub fn merge(parts: Vec<Object>) -> Merge {
    Merge { parts }
}

impl Parser for Merge {
    type State = Vec<ObjectState>;
    type Value = Record;

    fn mode(&self) -> Mode {
        self.parts
            .iter()
            .fold(Mode::Sync, |mode, part| mode.combine(part.mode()))
    }

    fn usage(&self) -> Vec<UsageTerm> {
        self.parts.iter().flat_map(|part| part.usage()).collect()
    }

    fn initial(&self) -> Vec<ObjectState> {
        self.parts.iter().map(|part| part.initial()).collect()
    }

    fn attempt(&self, state: &Vec<ObjectState>, buffer: &TokenBuffer, ctx: &Annotations) -> Attempt<Vec<ObjectState>> {
        let mut pending: Option<Failure> = None;
        for (i, part) in self.parts.iter().enumerate() {
            match part.attempt(&state[i], buffer, ctx) {
                Attempt::Progressed {
                    state: next,
                    consumed,
                } if consumed > 0 => {
                    let mut states = state.clone();
                    states[i] = next;
                    return Attempt::Progressed {
                        state: states,
                        consumed,
                    };
                }
                Attempt::Progressed { .. } => {}
                Attempt::Rejected { failure, consumed } if consumed > 0 => {
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

    fn finalize<'a>(&'a self, state: Vec<ObjectState>, ctx: &'a Annotations) -> Finalize<'a, Record> {
        if self.mode() == Mode::Sync {
            let mut record = Record::default();
            for (part, part_state) in self.parts.iter().zip(state) {
                match part.finalize(part_state, ctx).expect_ready() {
                    Ok(partial) => record.absorb(partial),
                    Err(failure) => return Finalize::err(failure),
                }
            }
            Finalize::ok(record)
        } else {
            Finalize::Deferred(Box::pin(async move {
                let mut record = Record::default();
                for (part, part_state) in self.parts.iter().zip(state) {
                    let partial = part.finalize(part_state, ctx).into_future().await?;
                    record.absorb(partial);
                }
                Ok(record)
            }))
        }
    }

    fn suggest<'a>(&'a self, state: &'a Vec<ObjectState>, prefix: &str) -> Suggestions<'a> {
        let prefix = prefix.to_string();
        Box::new(
            self.parts
                .iter()
                .zip(state.iter())
                .flat_map(move |(part, part_state)| part.suggest(part_state, &prefix)),
        )
    }

    fn doc(&self) -> DocFragments {
        self.parts
            .iter()
            .fold(DocFragments::default(), |acc, part| acc.merge(part.doc()))
    }
}
