//! Stock value parsers: strings, integers, fixed choices, filesystem paths

use crate::argot::message::Message;
use crate::argot::suggest::{FileKind, Suggestion};
use crate::argot::value::{ValueParser, ValueResult};
use std::path::PathBuf;

/// Accepts any token verbatim.
#[derive(Debug, Clone)]
pub struct StringValue {
    metavar: String,
}

pub fn string(metavar: impl Into<String>) -> StringValue {
    StringValue {
        metavar: metavar.into(),
    }
}

impl ValueParser for StringValue {
    type Output = String;

    fn metavar(&self) -> &str {
        &self.metavar
    }

    fn parse(&self, token: &str) -> ValueResult<'_, String> {
        ValueResult::Ready(Ok(token.to_string()))
    }

    fn format(&self, value: &String) -> String {
        value.clone()
    }
}

/// Parses a signed 64-bit integer, optionally range-checked.
#[derive(Debug, Clone)]
pub struct IntegerValue {
    metavar: String,
    min: Option<i64>,
    max: Option<i64>,
}

pub fn integer(metavar: impl Into<String>) -> IntegerValue {
    IntegerValue {
        metavar: metavar.into(),
        min: None,
        max: None,
    }
}

impl IntegerValue {
    pub fn at_least(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn at_most(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }
}

impl ValueParser for IntegerValue {
    type Output = i64;

    fn metavar(&self) -> &str {
        &self.metavar
    }

    fn parse(&self, token: &str) -> ValueResult<'_, i64> {
        let parsed: Result<i64, _> = token.parse();
        let result = match parsed {
            Err(_) => Err(Message::new()
                .text("expected an integer for")
                .metavar(&self.metavar)
                .text("but got")
                .value(token)),
            Ok(n) if self.min.map_or(false, |min| n < min) => Err(Message::new()
                .metavar(&self.metavar)
                .text("must be at least")
                .value(self.min.unwrap_or_default().to_string())),
            Ok(n) if self.max.map_or(false, |max| n > max) => Err(Message::new()
                .metavar(&self.metavar)
                .text("must be at most")
                .value(self.max.unwrap_or_default().to_string())),
            Ok(n) => Ok(n),
        };
        ValueResult::Ready(result)
    }

    fn format(&self, value: &i64) -> String {
        value.to_string()
    }
}

/// Accepts exactly one of a fixed set of tokens.
#[derive(Debug, Clone)]
pub struct ChoiceValue {
    metavar: String,
    choices: Vec<String>,
}

pub fn choice(
    metavar: impl Into<String>,
    choices: impl IntoIterator<Item = impl Into<String>>,
) -> ChoiceValue {
    ChoiceValue {
        metavar: metavar.into(),
        choices: choices.into_iter().map(Into::into).collect(),
    }
}

impl ValueParser for ChoiceValue {
    type Output = String;

    fn metavar(&self) -> &str {
        &self.metavar
    }

    fn parse(&self, token: &str) -> ValueResult<'_, String> {
        let result = if self.choices.iter().any(|c| c == token) {
            Ok(token.to_string())
        } else {
            Err(Message::new()
                .text("expected one of")
                .values(self.choices.clone())
                .text("but got")
                .value(token))
        };
        ValueResult::Ready(result)
    }

    fn format(&self, value: &String) -> String {
        value.clone()
    }

    fn suggest(&self, prefix: &str) -> Box<dyn Iterator<Item = Suggestion> + '_> {
        let prefix = prefix.to_string();
        Box::new(
            self.choices
                .iter()
                .filter(move |c| c.starts_with(&prefix))
                .map(|c| Suggestion::literal(c.clone())),
        )
    }
}

/// Accepts any token as a filesystem path; completes as a file.
#[derive(Debug, Clone)]
pub struct PathValue {
    metavar: String,
    extensions: Vec<String>,
}

pub fn path(metavar: impl Into<String>) -> PathValue {
    PathValue {
        metavar: metavar.into(),
        extensions: Vec::new(),
    }
}

impl PathValue {
    pub fn with_extensions(mut self, extensions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }
}

impl ValueParser for PathValue {
    type Output = PathBuf;

    fn metavar(&self) -> &str {
        &self.metavar
    }

    fn parse(&self, token: &str) -> ValueResult<'_, PathBuf> {
        ValueResult::Ready(Ok(PathBuf::from(token)))
    }

    fn format(&self, value: &PathBuf) -> String {
        value.display().to_string()
    }

    fn suggest(&self, prefix: &str) -> Box<dyn Iterator<Item = Suggestion> + '_> {
        let pattern = if prefix.is_empty() {
            None
        } else {
            Some(format!("{}*", prefix))
        };
        Box::new(std::iter::once(Suggestion::File {
            pattern,
            kind: Some(FileKind::Any),
            extensions: self.extensions.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_rejects_non_numeric() {
        let parser = integer("PORT");
        assert!(parser.parse("80").expect_ready().is_ok());
        assert!(parser.parse("eighty").expect_ready().is_err());
    }

    #[test]
    fn integer_range_check() {
        let parser = integer("PORT").at_least(1).at_most(65535);
        assert!(parser.parse("0").expect_ready().is_err());
        assert!(parser.parse("65536").expect_ready().is_err());
        assert_eq!(parser.parse("8080").expect_ready(), Ok(8080));
    }

    #[test]
    fn choice_suggests_by_prefix() {
        let parser = choice("FORMAT", ["json", "yaml", "text"]);
        let suggestions: Vec<_> = parser.suggest("j").collect();
        assert_eq!(suggestions, vec![Suggestion::literal("json")]);
    }
}
