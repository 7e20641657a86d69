//! End-to-end matching over realistic grammars
//!
//! Drives grammars through the public entry points only, the way a CLI
//! front end would, and asserts on typed values and the failure taxonomy.

use argot_parser::argot::constructs::{field, object, one_of, Field};
use argot_parser::argot::error::ErrorKind;
use argot_parser::argot::matching::parse;
use argot_parser::argot::modifiers::with_default;
use argot_parser::argot::parser::ParserExt;
use argot_parser::argot::primitives::{argument, command, flag, option, passthrough, trailing};
use argot_parser::argot::testing::expect_failure;
use argot_parser::argot::value::stock::{choice, integer, string};
use rstest::rstest;

const PORT: Field<i64> = Field::new("port");
const HOST: Field<String> = Field::new("host");
const VERBOSE: Field<bool> = Field::new("verbose");
const FILE: Field<String> = Field::new("file");
const EXEC: Field<Vec<String>> = Field::new("exec");

#[rstest]
#[case(&["--port", "8080"])]
#[case(&["--port=8080"])]
#[case(&["-p", "8080"])]
fn option_value_forms(#[case] args: &[&str]) {
    let port = option(&["--port", "-p"], integer("PORT"));
    assert_eq!(parse(&port, args), Ok(8080));
}

#[test]
fn object_accepts_fields_in_any_order() {
    let server = object(vec![
        field(&PORT, option(&["--port"], integer("PORT"))),
        field(&HOST, option(&["--host"], string("HOST"))),
        field(&VERBOSE, flag(&["-v", "--verbose"])),
    ]);

    let mut forward = parse(&server, &["--port", "80", "--host", "web", "-v"]).unwrap();
    let mut reversed = parse(&server, &["-v", "--host", "web", "--port", "80"]).unwrap();

    assert_eq!(forward.take(&PORT), Some(80));
    assert_eq!(reversed.take(&PORT), Some(80));
    assert_eq!(forward.take(&HOST).as_deref(), Some("web"));
    assert_eq!(reversed.take(&HOST).as_deref(), Some("web"));
    assert_eq!(forward.take(&VERBOSE), Some(true));
    assert_eq!(reversed.take(&VERBOSE), Some(true));
}

#[test]
fn absent_flag_finalizes_false() {
    let server = object(vec![
        field(&PORT, option(&["--port"], integer("PORT"))),
        field(&VERBOSE, flag(&["-v"])),
    ]);

    let mut record = parse(&server, &["--port", "80"]).unwrap();
    assert_eq!(record.take(&VERBOSE), Some(false));
}

#[test]
fn missing_required_option_is_reported() {
    let server = object(vec![field(&PORT, option(&["--port"], integer("PORT")))]);
    let failure = expect_failure(parse(&server, &[]), ErrorKind::MissingRequired);
    assert!(failure.to_string().contains("--port"));
}

#[test]
fn default_applies_only_on_pure_absence() {
    let server = object(vec![field(
        &PORT,
        with_default(option(&["--port"], integer("PORT")), 3000),
    )]);

    let mut record = parse(&server, &[]).unwrap();
    assert_eq!(record.take(&PORT), Some(3000));

    // Name supplied without a value is a real error, never the default.
    expect_failure(parse(&server, &["--port"]), ErrorKind::MissingValue);
}

#[test]
fn duplicate_single_use_option_is_a_hard_failure() {
    let server = object(vec![field(&PORT, option(&["--port"], integer("PORT")))]);
    let failure = expect_failure(
        parse(&server, &["--port", "1", "--port", "2"]),
        ErrorKind::Duplicate,
    );
    assert!(failure.to_string().contains("--port"));
}

#[test]
fn unclaimed_token_fails_with_unexpected() {
    let server = object(vec![field(&PORT, option(&["--port"], integer("PORT")))]);
    let failure = expect_failure(
        parse(&server, &["--port", "1", "extra"]),
        ErrorKind::UnexpectedToken,
    );
    assert!(failure.to_string().contains("extra"));
}

#[test]
fn validation_failure_names_the_option() {
    let server = object(vec![field(&PORT, option(&["--port"], integer("PORT")))]);
    let failure = expect_failure(parse(&server, &["--port", "web"]), ErrorKind::Validation);
    assert!(failure.to_string().contains("--port"));
    assert!(failure.to_string().contains("web"));
}

#[test]
fn repeated_option_through_multiple() {
    let includes = option(&["-I"], string("DIR")).multiple(1);
    assert_eq!(
        parse(&includes, &["-I", "src", "-I", "vendor"]),
        Ok(vec!["src".to_string(), "vendor".to_string()])
    );
    expect_failure(parse(&includes, &[]), ErrorKind::UnmetMinimum);
}

#[test]
fn passthrough_captures_after_marker() {
    let runner = object(vec![
        field(&PORT, option(&["--port"], integer("PORT"))),
        field(&EXEC, passthrough()),
    ]);

    let mut record = parse(&runner, &["--port", "1", "--", "make", "--jobs", "4"]).unwrap();
    assert_eq!(record.take(&PORT), Some(1));
    assert_eq!(
        record.take(&EXEC),
        Some(vec![
            "make".to_string(),
            "--jobs".to_string(),
            "4".to_string()
        ])
    );
}

#[test]
fn trailing_captures_from_first_unclaimed_position() {
    let wrapper = object(vec![
        field(&VERBOSE, flag(&["-v"])),
        field(&EXEC, trailing()),
    ]);

    let mut record = parse(&wrapper, &["-v", "build", "--fast"]).unwrap();
    assert_eq!(record.take(&VERBOSE), Some(true));
    assert_eq!(
        record.take(&EXEC),
        Some(vec!["build".to_string(), "--fast".to_string()])
    );
}

#[derive(Debug, PartialEq)]
enum Invocation {
    Serve { port: i64 },
    Convert { input: String, format: String },
}

fn cli() -> impl argot_parser::argot::parser::Parser<Value = Invocation> {
    let serve = command(
        "serve",
        object(vec![field(&PORT, option(&["--port"], integer("PORT")))]).map(|mut record| {
            Invocation::Serve {
                port: record.take(&PORT).unwrap(),
            }
        }),
    );
    let convert = command(
        "convert",
        object(vec![
            field(&FILE, argument(string("FILE"))),
            field(
                &HOST,
                with_default(
                    option(&["--format"], choice("FORMAT", ["json", "text"])),
                    "text".to_string(),
                ),
            ),
        ])
        .map(|mut record| Invocation::Convert {
            input: record.take(&FILE).unwrap(),
            format: record.take(&HOST).unwrap(),
        }),
    );
    one_of(vec![serve.boxed(), convert.boxed()])
}

#[test]
fn sub_commands_dispatch_by_name() {
    let cli = cli();
    assert_eq!(
        parse(&cli, &["serve", "--port", "8080"]),
        Ok(Invocation::Serve { port: 8080 })
    );
    assert_eq!(
        parse(&cli, &["convert", "notes.txt", "--format", "json"]),
        Ok(Invocation::Convert {
            input: "notes.txt".to_string(),
            format: "json".to_string(),
        })
    );
}

#[test]
fn committed_alternative_owns_the_error() {
    // Once `serve` is entered, its own validation failure is reported;
    // `convert` is never consulted.
    let cli = cli();
    let failure = expect_failure(
        parse(&cli, &["serve", "--port", "loud"]),
        ErrorKind::Validation,
    );
    assert!(failure.to_string().contains("--port"));
}

#[test]
fn later_alternative_wins_after_clean_declines() {
    let cli = cli();
    assert_eq!(
        parse(&cli, &["convert", "notes.txt"]),
        Ok(Invocation::Convert {
            input: "notes.txt".to_string(),
            format: "text".to_string(),
        })
    );
}
