//! # argot
//!
//! A combinator-based command-line grammar engine. One grammar definition,
//! built from composable parsers, yields typed parsing, usage strings, help
//! pages and shell-completion suggestions.
//!
//! The matching model is deliberately narrow: argot targets the mostly-linear
//! shape of CLI invocations (options in any order, positionals in sequence,
//! sub-commands, `--` pass-through), not general grammars. Ambiguity between
//! siblings is resolved locally by consumption counts, so there is no global
//! search and error positions stay precise.
//!
//! Entry points live in [`argot::matching`]; grammars are built from the
//! primitives in [`argot::primitives`] composed through [`argot::constructs`]
//! and [`argot::modifiers`].

pub mod argot;
