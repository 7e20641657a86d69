//! The option primitive: `--port 8080`, `-p 8080`, `--port=8080`

use crate::argot::context::Annotations;
use crate::argot::docs::{DocEntry, DocFragments, DocSection, UsageKind, UsageTerm};
use crate::argot::error::{ErrorKind, Failure};
use crate::argot::message::Message;
use crate::argot::parser::{Attempt, Finalize, Mode, Parser, Suggestions};
use crate::argot::suggest::Suggestion;
use crate::argot::token::{is_option_like, split_inline, TokenBuffer};
use crate::argot::value::{ValueParser, ValueResult};

/// Recognizes one of its registered names followed by an inline or next-token
/// value. Single-use: a second occurrence is a duplicate-use failure.
pub struct OptionParser<V> {
    names: Vec<String>,
    value: V,
    description: Option<Message>,
}

pub fn option<V: ValueParser>(names: &[&str], value: V) -> OptionParser<V> {
    OptionParser {
        names: names.iter().map(|n| n.to_string()).collect(),
        value,
        description: None,
    }
}

impl<V: ValueParser> OptionParser<V> {
    pub fn describe(mut self, description: impl Into<Message>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub(crate) fn value_parser(&self) -> &V {
        &self.value
    }

    fn owns(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    fn missing_value(&self) -> Failure {
        Failure::new(
            ErrorKind::MissingValue,
            Message::new()
                .text("option")
                .option_names(self.names.clone())
                .text("requires a value")
                .metavar(self.value.metavar()),
        )
    }

    fn invalid_value(&self, detail: Message) -> Failure {
        let mut message = Message::new().text("option").option_names(self.names.clone()).text(":");
        for term in detail.terms() {
            message.push(term.clone());
        }
        Failure::new(ErrorKind::Validation, message)
    }

    fn duplicate(&self) -> Failure {
        Failure::new(
            ErrorKind::Duplicate,
            Message::new()
                .text("option")
                .option_names(self.names.clone())
                .text("may only be supplied once"),
        )
    }
}

/// Match progress for an option: the raw value token once supplied.
///
/// The raw token, not the parsed value, is what threads through the state so
/// that the state stays cheap to clone and finalize can defer async parsing.
#[derive(Debug, Clone, Default)]
pub struct OptionState {
    pub(crate) raw: Option<String>,
}

impl<V: ValueParser> Parser for OptionParser<V> {
    type State = OptionState;
    type Value = V::Output;

    fn mode(&self) -> Mode {
        self.value.mode()
    }

    fn usage(&self) -> Vec<UsageTerm> {
        vec![UsageTerm::new(UsageKind::Option {
            names: self.names.clone(),
            metavar: Some(self.value.metavar().to_string()),
        })]
    }

    fn initial(&self) -> OptionState {
        OptionState::default()
    }

    fn attempt(&self, state: &OptionState, buffer: &TokenBuffer, _ctx: &Annotations) -> Attempt<OptionState> {
        let Some(head) = buffer.peek() else {
            return Attempt::Rejected {
                failure: Failure::unexpected(""),
                consumed: 0,
            };
        };

        // Inline form: --name=value
        if let Some((name, raw)) = split_inline(head) {
            if !self.owns(name) {
                return Attempt::Rejected {
                    failure: Failure::unexpected(head),
                    consumed: 0,
                };
            }
            if state.raw.is_some() {
                return Attempt::Rejected {
                    failure: self.duplicate(),
                    consumed: 0,
                };
            }
            if self.value.mode() == Mode::Sync {
                if let Err(detail) = self.value.parse(raw).expect_ready() {
                    return Attempt::Rejected {
                        failure: self.invalid_value(detail),
                        consumed: 1,
                    };
                }
            }
            return Attempt::Progressed {
                state: OptionState {
                    raw: Some(raw.to_string()),
                },
                consumed: 1,
            };
        }

        if !self.owns(head) {
            return Attempt::Rejected {
                failure: Failure::unexpected(head),
                consumed: 0,
            };
        }
        if state.raw.is_some() {
            return Attempt::Rejected {
                failure: self.duplicate(),
                consumed: 0,
            };
        }

        // Next-token form: the name is consumed even when the value is bad,
        // so disambiguation treats this as a real but failed attempt.
        match buffer.get(1) {
            None => Attempt::Rejected {
                failure: self.missing_value(),
                consumed: 1,
            },
            Some(next) if is_option_like(next) => Attempt::Rejected {
                failure: self.missing_value(),
                consumed: 1,
            },
            Some(next) => {
                if self.value.mode() == Mode::Sync {
                    if let Err(detail) = self.value.parse(next).expect_ready() {
                        return Attempt::Rejected {
                            failure: self.invalid_value(detail),
                            consumed: 1,
                        };
                    }
                }
                Attempt::Progressed {
                    state: OptionState {
                        raw: Some(next.to_string()),
                    },
                    consumed: 2,
                }
            }
        }
    }

    fn finalize<'a>(&'a self, state: OptionState, _ctx: &'a Annotations) -> Finalize<'a, V::Output> {
        match state.raw {
            None => Finalize::err(Failure::new(
                ErrorKind::MissingRequired,
                Message::new()
                    .text("missing required option")
                    .option_names(self.names.clone()),
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

    fn suggest<'a>(&'a self, state: &'a OptionState, prefix: &str) -> Suggestions<'a> {
        if state.raw.is_some() {
            return Box::new(std::iter::empty());
        }
        // Inline completion: "--name=par" completes values of the parser.
        if let Some((name, partial)) = prefix.split_once('=') {
            if self.owns(name) {
                let name = name.to_string();
                return Box::new(self.value.suggest(partial).map(move |s| match s {
                    Suggestion::Literal { text, description } => Suggestion::Literal {
                        text: format!("{}={}", name, text),
                        description,
                    },
                    other => other,
                }));
            }
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
                    term: self.usage().remove(0),
                    description: self.description.clone(),
                    default: None,
                }],
            }],
            ..DocFragments::default()
        }
    }
}
