//! The sub-command primitive

use crate::argot::context::Annotations;
use crate::argot::docs::{DocFragments, UsageKind, UsageTerm};
use crate::argot::error::{ErrorKind, Failure};
use crate::argot::message::Message;
use crate::argot::parser::{Attempt, Finalize, Mode, Parser, Suggestions};
use crate::argot::suggest::Suggestion;
use crate::argot::token::TokenBuffer;

/// Recognizes a literal first positional token equal to its name, then
/// delegates the remaining buffer to the nested parser.
pub struct CommandParser<P> {
    name: String,
    inner: P,
    brief: Option<Message>,
}

pub fn command<P: Parser>(name: impl Into<String>, inner: P) -> CommandParser<P> {
    CommandParser {
        name: name.into(),
        inner,
        brief: None,
    }
}

impl<P: Parser> CommandParser<P> {
    pub fn brief(mut self, brief: impl Into<Message>) -> Self {
        self.brief = Some(brief.into());
        self
    }
}

#[derive(Debug, Clone)]
pub enum CommandState<S> {
    Pending,
    Entered(S),
}

impl<P: Parser> Parser for CommandParser<P> {
    type State = CommandState<P::State>;
    type Value = P::Value;

    fn mode(&self) -> Mode {
        self.inner.mode()
    }

    fn usage(&self) -> Vec<UsageTerm> {
        let mut terms = vec![UsageTerm::new(UsageKind::Command {
            name: self.name.clone(),
        })];
        terms.extend(self.inner.usage());
        terms
    }

    fn initial(&self) -> Self::State {
        CommandState::Pending
    }

    fn attempt(&self, state: &Self::State, buffer: &TokenBuffer, ctx: &Annotations) -> Attempt<Self::State> {
        match state {
            CommandState::Pending => match buffer.peek() {
                Some(head) if head == self.name => Attempt::Progressed {
                    state: CommandState::Entered(self.inner.initial()),
                    consumed: 1,
                },
                Some(head) => Attempt::Rejected {
                    failure: Failure::unexpected(head),
                    consumed: 0,
                },
                None => Attempt::Rejected {
                    failure: Failure::unexpected(""),
                    consumed: 0,
                },
            },
            CommandState::Entered(inner_state) => {
                match self.inner.attempt(inner_state, buffer, ctx) {
                    Attempt::Progressed { state, consumed } => Attempt::Progressed {
                        state: CommandState::Entered(state),
                        consumed,
                    },
                    Attempt::Rejected { failure, consumed } => {
                        Attempt::Rejected { failure, consumed }
                    }
                }
            }
        }
    }

    fn finalize<'a>(&'a self, state: Self::State, ctx: &'a Annotations) -> Finalize<'a, P::Value> {
        match state {
            CommandState::Pending => Finalize::err(Failure::new(
                ErrorKind::MissingRequired,
                Message::new()
                    .text("missing command")
                    .value(self.name.clone()),
            )),
            CommandState::Entered(inner_state) => self.inner.finalize(inner_state, ctx),
        }
    }

    fn suggest<'a>(&'a self, state: &'a Self::State, prefix: &str) -> Suggestions<'a> {
        match state {
            CommandState::Pending => {
                let suggestion = match &self.brief {
                    Some(brief) => Suggestion::literal_with(self.name.clone(), brief.to_string()),
                    None => Suggestion::literal(self.name.clone()),
                };
                Box::new(std::iter::once(suggestion))
            }
            CommandState::Entered(inner_state) => self.inner.suggest(inner_state, prefix),
        }
    }

    fn doc(&self) -> DocFragments {
        let mut fragments = self.inner.doc();
        if fragments.brief.is_none() {
            fragments.brief = self.brief.clone();
        }
        fragments
    }
}
