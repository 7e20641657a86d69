//! Pass-through capture
//!
//! Once triggered, consumes every remaining token verbatim. Greedy is the
//! only policy: nothing resumes after a pass-through attaches.

use crate::argot::context::Annotations;
use crate::argot::docs::{DocFragments, UsageKind, UsageTerm};
use crate::argot::error::Failure;
use crate::argot::parser::{Attempt, Finalize, Parser, Suggestions};
use crate::argot::suggest::Suggestion;
use crate::argot::token::{TokenBuffer, PASSTHROUGH_MARKER};

/// Captures remaining tokens into an ordered sequence.
pub struct Passthrough {
    marker: Option<String>,
}

/// Triggered by the `--` form marker; the marker itself is not captured.
pub fn passthrough() -> Passthrough {
    Passthrough {
        marker: Some(PASSTHROUGH_MARKER.to_string()),
    }
}

/// Triggered by any remaining token: captures from the first position no
/// other combinator claimed.
pub fn trailing() -> Passthrough {
    Passthrough { marker: None }
}

#[derive(Debug, Clone, Default)]
pub struct PassthroughState {
    captured: Option<Vec<String>>,
}

impl Parser for Passthrough {
    type State = PassthroughState;
    type Value = Vec<String>;

    fn usage(&self) -> Vec<UsageTerm> {
        vec![UsageTerm::new(UsageKind::Passthrough)]
    }

    fn initial(&self) -> PassthroughState {
        PassthroughState::default()
    }

    fn attempt(&self, state: &PassthroughState, buffer: &TokenBuffer, _ctx: &Annotations) -> Attempt<PassthroughState> {
        if state.captured.is_some() {
            // Already attached; greedy capture never re-enters.
            return Attempt::Rejected {
                failure: Failure::unexpected(buffer.peek().unwrap_or("")),
                consumed: 0,
            };
        }
        let Some(head) = buffer.peek() else {
            return Attempt::Rejected {
                failure: Failure::unexpected(""),
                consumed: 0,
            };
        };
        match &self.marker {
            Some(marker) if head == marker => Attempt::Progressed {
                state: PassthroughState {
                    captured: Some(buffer.remaining()[1..].to_vec()),
                },
                consumed: buffer.len(),
            },
            Some(_) => Attempt::Rejected {
                failure: Failure::unexpected(head),
                consumed: 0,
            },
            None => Attempt::Progressed {
                state: PassthroughState {
                    captured: Some(buffer.remaining().to_vec()),
                },
                consumed: buffer.len(),
            },
        }
    }

    fn finalize<'a>(&'a self, state: PassthroughState, _ctx: &'a Annotations) -> Finalize<'a, Vec<String>> {
        Finalize::ok(state.captured.unwrap_or_default())
    }

    fn suggest<'a>(&'a self, state: &'a PassthroughState, _prefix: &str) -> Suggestions<'a> {
        match (&self.marker, &state.captured) {
            (Some(marker), None) => Box::new(std::iter::once(Suggestion::literal(marker.clone()))),
            _ => Box::new(std::iter::empty()),
        }
    }

    fn doc(&self) -> DocFragments {
        DocFragments::default()
    }
}
