//! Regex-backed value parser

use crate::argot::message::Message;
use crate::argot::value::{ValueParser, ValueResult};
use regex::Regex;

/// Accepts tokens matching a compiled regular expression in full.
#[derive(Debug, Clone)]
pub struct PatternValue {
    metavar: String,
    regex: Regex,
}

pub fn pattern(metavar: impl Into<String>, regex: Regex) -> PatternValue {
    PatternValue {
        metavar: metavar.into(),
        regex,
    }
}

impl ValueParser for PatternValue {
    type Output = String;

    fn metavar(&self) -> &str {
        &self.metavar
    }

    fn parse(&self, token: &str) -> ValueResult<'_, String> {
        let matched = self
            .regex
            .find(token)
            .map_or(false, |m| m.start() == 0 && m.end() == token.len());
        let result = if matched {
            Ok(token.to_string())
        } else {
            Err(Message::new()
                .metavar(&self.metavar)
                .text("must match")
                .value(self.regex.as_str())
                .text("but got")
                .value(token))
        };
        ValueResult::Ready(result)
    }

    fn format(&self, value: &String) -> String {
        value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_match_required() {
        let parser = pattern("REF", Regex::new("[a-z]+").expect("valid pattern"));
        assert!(parser.parse("main").expect_ready().is_ok());
        assert!(parser.parse("main2").expect_ready().is_err());
        assert!(parser.parse("2main").expect_ready().is_err());
    }
}
