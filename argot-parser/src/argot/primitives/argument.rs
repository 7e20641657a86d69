//! The positional argument primitive

use crate::argot::context::Annotations;
use crate::argot::docs::{DocEntry, DocFragments, DocSection, UsageKind, UsageTerm};
use crate::argot::error::{ErrorKind, Failure};
use crate::argot::message::Message;
use crate::argot::parser::{Attempt, Finalize, Mode, Parser, Suggestions};
use crate::argot::token::{is_option_like, TokenBuffer, PASSTHROUGH_MARKER};
use crate::argot::value::{ValueParser, ValueResult};

/// Recognizes exactly one non-option-shaped token at the current position.
///
/// A validation failure here consumes nothing, so sibling alternatives may
/// try other argument shapes; the failure still surfaces if nothing claims
/// the token.
pub struct ArgumentParser<V> {
    value: V,
    description: Option<Message>,
}

pub fn argument<V: ValueParser>(value: V) -> ArgumentParser<V> {
    ArgumentParser {
        value,
        description: None,
    }
}

impl<V: ValueParser> ArgumentParser<V> {
    pub fn describe(mut self, description: impl Into<Message>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn invalid_value(&self, detail: Message) -> Failure {
        let mut message = Message::new().text("argument").metavar(self.value.metavar()).text(":");
        for term in detail.terms() {
            message.push(term.clone());
        }
        Failure::new(ErrorKind::Validation, message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ArgumentState {
    raw: Option<String>,
}

impl<V: ValueParser> Parser for ArgumentParser<V> {
    type State = ArgumentState;
    type Value = V::Output;

    fn mode(&self) -> Mode {
        self.value.mode()
    }

    fn usage(&self) -> Vec<UsageTerm> {
        vec![UsageTerm::new(UsageKind::Argument {
            metavar: self.value.metavar().to_string(),
        })]
    }

    fn initial(&self) -> ArgumentState {
        ArgumentState::default()
    }

    fn attempt(&self, state: &ArgumentState, buffer: &TokenBuffer, _ctx: &Annotations) -> Attempt<ArgumentState> {
        let Some(head) = buffer.peek() else {
            return Attempt::Rejected {
                failure: Failure::unexpected(""),
                consumed: 0,
            };
        };
        if state.raw.is_some() || is_option_like(head) || head == PASSTHROUGH_MARKER {
            return Attempt::Rejected {
                failure: Failure::unexpected(head),
                consumed: 0,
            };
        }
        if self.value.mode() == Mode::Sync {
            if let Err(detail) = self.value.parse(head).expect_ready() {
                return Attempt::Rejected {
                    failure: self.invalid_value(detail),
                    consumed: 0,
                };
            }
        }
        Attempt::Progressed {
            state: ArgumentState {
                raw: Some(head.to_string()),
            },
            consumed: 1,
        }
    }

    fn finalize<'a>(&'a self, state: ArgumentState, _ctx: &'a Annotations) -> Finalize<'a, V::Output> {
        match state.raw {
            None => Finalize::err(Failure::new(
                ErrorKind::MissingRequired,
                Message::new()
                    .text("missing required argument")
                    .metavar(self.value.metavar()),
            )),
            Some(raw) => match self.value.parse(&raw) {
                ValueResult::Ready(result) => {
                    Finalize::Ready(result.map_err(|detail| self.invalid_value(detail)))
                }
                ValueResult::Deferred(future) => Finalize::Deferred(Box::pin(async move {
                    future.await.map_err(|detail| self.invalid_value(detail))
                })),
            },
        }
    }

    fn suggest<'a>(&'a self, state: &'a ArgumentState, prefix: &str) -> Suggestions<'a> {
        if state.raw.is_some() {
            return Box::new(std::iter::empty());
        }
        self.value.suggest(prefix)
    }

    fn doc(&self) -> DocFragments {
        DocFragments {
            sections: vec![DocSection {
                title: None,
                entries: vec![DocEntry {
                    term: UsageTerm::new(UsageKind::Argument {
                        metavar: self.value.metavar().to_string(),
                    }),
                    description: self.description.clone(),
                    default: None,
                }],
            }],
            ..DocFragments::default()
        }
    }
}
