//! Environment and settings-file fallback for options
//!
//! Collaborators resolve their source data once, before the pass, and deposit
//! it into the pass annotations under a key private to the collaborator
//! instance. A bound option reads the fallback only at finalize and only when
//! it consumed nothing from the command line: a supplied-but-broken option
//! stays broken, it never silently falls back.
//!
//! Settings files are layered TOML loaded through the `config` crate; later
//! layers override earlier ones key by key.

use crate::argot::context::{Annotations, ContextKey};
use crate::argot::docs::{DocFragments, UsageTerm};
use crate::argot::message::Message;
use crate::argot::parser::{Attempt, Finalize, Mode, Parser, Suggestions};
use crate::argot::primitives::{OptionParser, OptionState};
use crate::argot::token::TokenBuffer;
use crate::argot::value::ValueParser;
use config::{Config, ConfigError, File, FileFormat};
use std::collections::HashMap;
use std::path::Path;

/// Environment variables as a fallback source.
///
/// Each instance owns a private [`ContextKey`], so two `EnvVars` in one pass
/// (say, real process env and an injected test env) never observe each
/// other's data.
pub struct EnvVars {
    key: ContextKey<HashMap<String, String>>,
    values: HashMap<String, String>,
}

impl EnvVars {
    /// Snapshot the process environment.
    pub fn from_process() -> Self {
        Self::from_iter(std::env::vars())
    }

    /// Build from explicit pairs, typically in tests.
    pub fn from_iter(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        EnvVars {
            key: ContextKey::new("env-vars"),
            values: pairs.into_iter().collect(),
        }
    }

    /// Deposit this collaborator's data into the pass annotations.
    pub fn annotate(&self, ctx: &mut Annotations) {
        ctx.insert(&self.key, self.values.clone());
    }

    /// Wrap an option so that, when absent from argv, its value is read from
    /// the named environment variable instead.
    pub fn bind<V: ValueParser>(&self, var: &str, inner: OptionParser<V>) -> BoundOption<V> {
        BoundOption {
            inner,
            key: self.key,
            lookup: var.to_string(),
            source: FallbackSource::Environment,
        }
    }
}

/// Layered TOML settings as a fallback source.
pub struct FileSettings {
    key: ContextKey<HashMap<String, String>>,
    values: HashMap<String, String>,
}

/// Builder layering settings files before a [`FileSettings`] is produced.
#[derive(Default)]
pub struct SettingsLoader {
    builder: config::builder::ConfigBuilder<config::builder::DefaultState>,
}

impl SettingsLoader {
    pub fn new() -> Self {
        SettingsLoader {
            builder: Config::builder(),
        }
    }

    /// Layer a settings file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional settings file (ignored if absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Resolve the layers into flat key/value pairs. Values stay raw strings;
    /// the bound option's value parser does the typing.
    pub fn build(self) -> Result<FileSettings, ConfigError> {
        let resolved = self
            .builder
            .build()?
            .try_deserialize::<HashMap<String, config::Value>>()?;
        let mut values = HashMap::new();
        for (name, value) in resolved {
            values.insert(name, value.into_string()?);
        }
        Ok(FileSettings {
            key: ContextKey::new("file-settings"),
            values,
        })
    }
}

impl FileSettings {
    pub fn loader() -> SettingsLoader {
        SettingsLoader::new()
    }

    /// Build from explicit pairs, typically in tests.
    pub fn from_iter(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        FileSettings {
            key: ContextKey::new("file-settings"),
            values: pairs.into_iter().collect(),
        }
    }

    /// Deposit this collaborator's data into the pass annotations.
    pub fn annotate(&self, ctx: &mut Annotations) {
        ctx.insert(&self.key, self.values.clone());
    }

    /// Wrap an option so that, when absent from argv, its value is read from
    /// the named settings key instead.
    pub fn bind<V: ValueParser>(&self, setting: &str, inner: OptionParser<V>) -> BoundOption<V> {
        BoundOption {
            inner,
            key: self.key,
            lookup: setting.to_string(),
            source: FallbackSource::Settings,
        }
    }
}

#[derive(Clone, Copy)]
enum FallbackSource {
    Environment,
    Settings,
}

/// An option with a fallback source consulted only on pure absence.
pub struct BoundOption<V> {
    inner: OptionParser<V>,
    key: ContextKey<HashMap<String, String>>,
    lookup: String,
    source: FallbackSource,
}

impl<V: ValueParser> BoundOption<V> {
    fn origin_note(&self) -> Message {
        match self.source {
            FallbackSource::Environment => {
                Message::new().text("(from environment variable").env_var(&self.lookup).text(")")
            }
            FallbackSource::Settings => {
                Message::new().text("(from settings key").value(&self.lookup).text(")")
            }
        }
    }

    fn absence_note(&self) -> Message {
        match self.source {
            FallbackSource::Environment => {
                Message::new().text("and environment variable").env_var(&self.lookup).text("is unset")
            }
            FallbackSource::Settings => {
                Message::new().text("and settings key").value(&self.lookup).text("is unset")
            }
        }
    }
}

impl<V: ValueParser> Parser for BoundOption<V> {
    type State = OptionState;
    type Value = V::Output;

    fn mode(&self) -> Mode {
        self.inner.mode()
    }

    fn priority(&self) -> i16 {
        self.inner.priority()
    }

    fn usage(&self) -> Vec<UsageTerm> {
        self.inner.usage()
    }

    fn initial(&self) -> OptionState {
        self.inner.initial()
    }

    fn attempt(&self, state: &OptionState, buffer: &TokenBuffer, ctx: &Annotations) -> Attempt<OptionState> {
        self.inner.attempt(state, buffer, ctx)
    }

    fn finalize<'a>(&'a self, state: OptionState, ctx: &'a Annotations) -> Finalize<'a, V::Output> {
        if state.raw.is_some() {
            return self.inner.finalize(state, ctx);
        }
        let fallback = ctx
            .get(&self.key)
            .and_then(|values| values.get(&self.lookup));
        match fallback {
            Some(raw) => {
                let substituted = OptionState {
                    raw: Some(raw.clone()),
                };
                self.inner
                    .finalize(substituted, ctx)
                    .then(move |result| result.map_err(|f| f.with_message(self.origin_note())))
            }
            // Pure absence stays a recoverable missing-required failure, so
            // an enclosing default still applies.
            None => self
                .inner
                .finalize(state, ctx)
                .then(move |result| result.map_err(|f| f.with_message(self.absence_note()))),
        }
    }

    fn suggest<'a>(&'a self, state: &'a OptionState, prefix: &str) -> Suggestions<'a> {
        self.inner.suggest(state, prefix)
    }

    fn doc(&self) -> DocFragments {
        self.inner.doc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argot::error::ErrorKind;
    use crate::argot::matching::parse_with;
    use crate::argot::parser::ParserExt;
    use crate::argot::primitives::option;
    use crate::argot::value::stock::integer;

    fn env(pairs: &[(&str, &str)]) -> EnvVars {
        EnvVars::from_iter(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    #[test]
    fn cli_value_wins_over_environment() {
        let source = env(&[("APP_PORT", "9000")]);
        let port = source.bind("APP_PORT", option(&["--port"], integer("PORT")));
        let mut ctx = Annotations::new();
        source.annotate(&mut ctx);

        assert_eq!(parse_with(&port, &["--port", "8080"], &ctx), Ok(8080));
    }

    #[test]
    fn absent_option_falls_back_to_environment() {
        let source = env(&[("APP_PORT", "9000")]);
        let port = source.bind("APP_PORT", option(&["--port"], integer("PORT")));
        let mut ctx = Annotations::new();
        source.annotate(&mut ctx);

        assert_eq!(parse_with(&port, &[], &ctx), Ok(9000));
    }

    #[test]
    fn supplied_name_without_value_never_falls_back() {
        let source = env(&[("APP_PORT", "9000")]);
        let port = source.bind("APP_PORT", option(&["--port"], integer("PORT")));
        let mut ctx = Annotations::new();
        source.annotate(&mut ctx);

        let err = parse_with(&port, &["--port"], &ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingValue);
    }

    #[test]
    fn unset_everywhere_recovers_through_default() {
        let source = env(&[]);
        let port = source
            .bind("APP_PORT", option(&["--port"], integer("PORT")))
            .with_default(3000);
        let mut ctx = Annotations::new();
        source.annotate(&mut ctx);

        assert_eq!(parse_with(&port, &[], &ctx), Ok(3000));
    }

    #[test]
    fn invalid_environment_value_reports_origin() {
        let source = env(&[("APP_PORT", "not-a-number")]);
        let port = source.bind("APP_PORT", option(&["--port"], integer("PORT")));
        let mut ctx = Annotations::new();
        source.annotate(&mut ctx);

        let err = parse_with(&port, &[], &ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("APP_PORT"));
    }

    #[test]
    fn collaborators_never_see_each_other() {
        let first = env(&[("PORT", "1111")]);
        let second = env(&[("PORT", "2222")]);
        let bound_first = first.bind("PORT", option(&["--first"], integer("PORT")));
        let bound_second = second.bind("PORT", option(&["--second"], integer("PORT")));

        let mut ctx = Annotations::new();
        first.annotate(&mut ctx);
        second.annotate(&mut ctx);

        assert_eq!(parse_with(&bound_first, &[], &ctx), Ok(1111));
        assert_eq!(parse_with(&bound_second, &[], &ctx), Ok(2222));
    }

    #[test]
    fn settings_pairs_behave_like_environment() {
        let settings = FileSettings::from_iter([("port".to_string(), "7000".to_string())]);
        let port = settings.bind("port", option(&["--port"], integer("PORT")));
        let mut ctx = Annotations::new();
        settings.annotate(&mut ctx);

        assert_eq!(parse_with(&port, &[], &ctx), Ok(7000));
    }
}
