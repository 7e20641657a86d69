//! Closure-backed value parsers, sync and async

use crate::argot::message::Message;
use crate::argot::parser::Mode;
use crate::argot::value::{BoxedFuture, ValueParser, ValueResult};

/// A value parser defined by a pair of closures.
pub struct CustomValue<T> {
    metavar: String,
    parse: Box<dyn Fn(&str) -> Result<T, Message>>,
    format: Box<dyn Fn(&T) -> String>,
}

pub fn custom<T: 'static>(
    metavar: impl Into<String>,
    parse: impl Fn(&str) -> Result<T, Message> + 'static,
    format: impl Fn(&T) -> String + 'static,
) -> CustomValue<T> {
    CustomValue {
        metavar: metavar.into(),
        parse: Box::new(parse),
        format: Box::new(format),
    }
}

impl<T: 'static> ValueParser for CustomValue<T> {
    type Output = T;

    fn metavar(&self) -> &str {
        &self.metavar
    }

    fn parse(&self, token: &str) -> ValueResult<'_, T> {
        ValueResult::Ready((self.parse)(token))
    }

    fn format(&self, value: &T) -> String {
        (self.format)(value)
    }
}

/// A value parser whose conversion requires awaiting an external lookup.
///
/// Any parser tree containing one of these reports `Mode::Async` and must be
/// driven through the async entry point. Validation surfaces at finalize, not
/// during the attempt phase, because the attempt phase never awaits.
pub struct AsyncValue<T> {
    metavar: String,
    parse: Box<dyn Fn(String) -> BoxedFuture<'static, Result<T, Message>>>,
    format: Box<dyn Fn(&T) -> String>,
}

pub fn custom_async<T: 'static>(
    metavar: impl Into<String>,
    parse: impl Fn(String) -> BoxedFuture<'static, Result<T, Message>> + 'static,
    format: impl Fn(&T) -> String + 'static,
) -> AsyncValue<T> {
    AsyncValue {
        metavar: metavar.into(),
        parse: Box::new(parse),
        format: Box::new(format),
    }
}

impl<T: 'static> ValueParser for AsyncValue<T> {
    type Output = T;

    fn metavar(&self) -> &str {
        &self.metavar
    }

    fn mode(&self) -> Mode {
        Mode::Async
    }

    fn parse(&self, token: &str) -> ValueResult<'_, T> {
        ValueResult::Deferred((self.parse)(token.to_string()))
    }

    fn format(&self, value: &T) -> String {
        (self.format)(value)
    }
}
