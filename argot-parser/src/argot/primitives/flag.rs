//! The flag primitive: presence alone yields `true`

use crate::argot::context::Annotations;
use crate::argot::docs::{DocEntry, DocFragments, DocSection, UsageKind, UsageTerm};
use crate::argot::error::{ErrorKind, Failure};
use crate::argot::message::Message;
use crate::argot::parser::{Attempt, Finalize, Parser, Suggestions};
use crate::argot::suggest::Suggestion;
use crate::argot::token::TokenBuffer;

/// A valueless option. Absent yields `false`, present yields `true`; a second
/// occurrence is a duplicate-use failure.
pub struct FlagParser {
    names: Vec<String>,
    description: Option<Message>,
}

pub fn flag(names: &[&str]) -> FlagParser {
    FlagParser {
        names: names.iter().map(|n| n.to_string()).collect(),
        description: None,
    }
}

impl FlagParser {
    pub fn describe(mut self, description: impl Into<Message>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn owns(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FlagState {
    seen: bool,
}

impl Parser for FlagParser {
    type State = FlagState;
    type Value = bool;

    fn usage(&self) -> Vec<UsageTerm> {
        // A flag is never required, so its usage shape is already optional.
        vec![UsageTerm::new(UsageKind::Optional {
            terms: vec![UsageTerm::new(UsageKind::Option {
                names: self.names.clone(),
                metavar: None,
            })],
        })]
    }

    fn initial(&self) -> FlagState {
        FlagState::default()
    }

    fn attempt(&self, state: &FlagState, buffer: &TokenBuffer, _ctx: &Annotations) -> Attempt<FlagState> {
        match buffer.peek() {
            Some(head) if self.owns(head) => {
                if state.seen {
                    Attempt::Rejected {
                        failure: Failure::new(
                            ErrorKind::Duplicate,
                            Message::new()
                                .text("flag")
                                .option_names(self.names.clone())
                                .text("may only be supplied once"),
                        ),
                        consumed: 0,
                    }
                } else {
                    Attempt::Progressed {
                        state: FlagState { seen: true },
                        consumed: 1,
                    }
                }
            }
            Some(head) => Attempt::Rejected {
                failure: Failure::unexpected(head),
                consumed: 0,
            },
            None => Attempt::Rejected {
                failure: Failure::unexpected(""),
                consumed: 0,
            },
        }
    }

    fn finalize<'a>(&'a self, state: FlagState, _ctx: &'a Annotations) -> Finalize<'a, bool> {
        Finalize::ok(state.seen)
    }

    fn suggest<'a>(&'a self, state: &'a FlagState, _prefix: &str) -> Suggestions<'a> {
        if state.seen {
            return Box::new(std::iter::empty());
        }
        let description = self.description.as_ref().map(|m| m.to_string());
        Box::new(self.names.iter().map(move |name| match &description {
            Some(d) => Suggestion::literal_with(name.clone(), d.clone()),
            None => Suggestion::literal(name.clone()),
        }))
    }

    fn doc(&self) -> DocFragments {
        DocFragments {
            sections: vec![DocSection {
                title: None,
                entries: vec![DocEntry {
                    term: UsageTerm::new(UsageKind::Option {
                        names: self.names.clone(),
                        metavar: None,
                    }),
                    description: self.description.clone(),
                    default: None,
                }],
            }],
            ..DocFragments::default()
        }
    }
}
