//! Structured user-facing messages
//!
//! Every message the engine produces is an ordered sequence of typed terms,
//! never a pre-rendered string. Renderers (terminal printer, man-page
//! formatter, completion front ends) decide how each term kind is marked up;
//! the `Display` impl here is only the plain-text fallback used by error
//! propagation and tests.

use serde::Serialize;
use std::fmt;

/// One typed fragment of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Term {
    /// Plain prose.
    Text(String),
    /// A single option name, e.g. `--port`.
    OptionName(String),
    /// A set of option names that identify one option.
    OptionNames(Vec<String>),
    /// A value placeholder, e.g. `PORT`.
    Metavar(String),
    /// A literal value supplied by the user.
    Value(String),
    /// Several literal values.
    Values(Vec<String>),
    /// An environment variable name.
    EnvVar(String),
    /// A reproduced command-line snippet.
    CommandLine(String),
    /// A documentation link.
    Url(String),
}

/// An ordered sequence of [`Term`]s.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Message {
    terms: Vec<Term>,
}

impl Message {
    pub fn new() -> Self {
        Message::default()
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn push(&mut self, term: Term) {
        self.terms.push(term);
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.terms.push(Term::Text(text.into()));
        self
    }

    pub fn option_name(mut self, name: impl Into<String>) -> Self {
        self.terms.push(Term::OptionName(name.into()));
        self
    }

    pub fn option_names(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.terms
            .push(Term::OptionNames(names.into_iter().map(Into::into).collect()));
        self
    }

    pub fn metavar(mut self, metavar: impl Into<String>) -> Self {
        self.terms.push(Term::Metavar(metavar.into()));
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.terms.push(Term::Value(value.into()));
        self
    }

    pub fn values(mut self, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.terms
            .push(Term::Values(values.into_iter().map(Into::into).collect()));
        self
    }

    pub fn env_var(mut self, name: impl Into<String>) -> Self {
        self.terms.push(Term::EnvVar(name.into()));
        self
    }

    pub fn command_line(mut self, line: impl Into<String>) -> Self {
        self.terms.push(Term::CommandLine(line.into()));
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.terms.push(Term::Url(url.into()));
        self
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::new().text(text)
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::new().text(text)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Text(text) => write!(f, "{}", text),
            Term::OptionName(name) => write!(f, "{}", name),
            Term::OptionNames(names) => write!(f, "{}", names.join("/")),
            Term::Metavar(metavar) => write!(f, "{}", metavar),
            Term::Value(value) => write!(f, "\"{}\"", value),
            Term::Values(values) => {
                let quoted: Vec<String> = values.iter().map(|v| format!("\"{}\"", v)).collect();
                write!(f, "{}", quoted.join(", "))
            }
            Term::EnvVar(name) => write!(f, "{}", name),
            Term::CommandLine(line) => write!(f, "`{}`", line),
            Term::Url(url) => write!(f, "<{}>", url),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", term)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_preserves_term_order() {
        let message = Message::new()
            .text("option")
            .option_name("--port")
            .text("requires a value")
            .metavar("PORT");

        assert_eq!(message.terms().len(), 4);
        assert_eq!(message.to_string(), "option --port requires a value PORT");
    }

    #[test]
    fn values_are_quoted_in_plain_rendering() {
        let message = Message::new().text("got").value("abc");
        assert_eq!(message.to_string(), "got \"abc\"");
    }
}
