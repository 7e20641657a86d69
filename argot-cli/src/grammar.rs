//! The argot demo command surface, defined with argot's own combinators

use argot_parser::argot::bind::EnvVars;
use argot_parser::argot::constructs::{field, object, one_of, Field};
use argot_parser::argot::parser::{Boxed, ParserExt};
use argot_parser::argot::primitives::{argument, command, flag, option, trailing};
use argot_parser::argot::value::stock::{integer, string};

const PORT: Field<i64> = Field::new("port");
const HOST: Field<String> = Field::new("host");
const VERBOSE: Field<bool> = Field::new("verbose");
const REPEAT: Field<i64> = Field::new("repeat");
const UPPER: Field<bool> = Field::new("upper");
const TEXT: Field<Vec<String>> = Field::new("text");
const WORDS: Field<Vec<String>> = Field::new("words");

/// One fully parsed invocation of the binary.
#[derive(Debug, PartialEq)]
pub enum Invocation {
    Serve {
        port: i64,
        host: String,
        verbose: bool,
    },
    Echo {
        text: Vec<String>,
        repeat: i64,
        upper: bool,
    },
    /// Raw words of a partial command line, completed against the grammar.
    Complete { words: Vec<String> },
}

/// The full top-level grammar. `env` supplies the fallback source for
/// options bound to environment variables.
pub fn grammar(env: &EnvVars) -> Boxed<Invocation> {
    one_of(vec![serve(env), echo(), complete_words()]).boxed()
}

fn serve(env: &EnvVars) -> Boxed<Invocation> {
    let port = env
        .bind(
            "ARGOT_PORT",
            option(&["--port", "-p"], integer("PORT").at_least(1).at_most(65535))
                .describe("port to listen on"),
        )
        .with_default(3000)
        .shown_as("3000");
    let host = option(&["--host"], string("HOST"))
        .describe("address to bind")
        .with_default("127.0.0.1".to_string())
        .shown_as("127.0.0.1");
    let verbose = flag(&["-v", "--verbose"]).describe("log every request");

    command(
        "serve",
        object(vec![
            field(&PORT, port),
            field(&HOST, host),
            field(&VERBOSE, verbose),
        ])
        .titled("Serve options")
        .map(|mut record| Invocation::Serve {
            port: record.take(&PORT).unwrap_or_default(),
            host: record.take(&HOST).unwrap_or_default(),
            verbose: record.take(&VERBOSE).unwrap_or_default(),
        }),
    )
    .brief("start a demo server")
    .boxed()
}

fn echo() -> Boxed<Invocation> {
    let repeat = option(&["--repeat", "-n"], integer("COUNT").at_least(1))
        .describe("print the line this many times")
        .with_default(1)
        .shown_as("1");
    let upper = flag(&["--upper"]).describe("shout");
    let text = argument(string("TEXT")).multiple(1);

    command(
        "echo",
        object(vec![
            field(&REPEAT, repeat),
            field(&UPPER, upper),
            field(&TEXT, text),
        ])
        .titled("Echo options")
        .map(|mut record| Invocation::Echo {
            text: record.take(&TEXT).unwrap_or_default(),
            repeat: record.take(&REPEAT).unwrap_or_default(),
            upper: record.take(&UPPER).unwrap_or_default(),
        }),
    )
    .brief("print text back")
    .boxed()
}

fn complete_words() -> Boxed<Invocation> {
    command(
        "complete",
        object(vec![field(&WORDS, trailing())]).map(|mut record| Invocation::Complete {
            words: record.take(&WORDS).unwrap_or_default(),
        }),
    )
    .brief("suggest completions for a partial command line")
    .boxed()
}
