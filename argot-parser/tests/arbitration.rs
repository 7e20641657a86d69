//! Arbitration between overlapping grammar branches
//!
//! Longest-match selection, the non-empty demotion of all-defaults branches,
//! and discriminated branching.

use argot_parser::argot::constructs::{conditional, field, longest, object, Field};
use argot_parser::argot::error::ErrorKind;
use argot_parser::argot::matching::parse;
use argot_parser::argot::parser::ParserExt;
use argot_parser::argot::primitives::{argument, command, flag, option};
use argot_parser::argot::testing::expect_failure;
use argot_parser::argot::value::stock::{integer, string};

const A: Field<String> = Field::new("a");
const B: Field<String> = Field::new("b");
const C: Field<String> = Field::new("c");
const D: Field<String> = Field::new("d");
const E: Field<String> = Field::new("e");
const KEY: Field<String> = Field::new("key");
const PORT: Field<i64> = Field::new("port");
const PRETTY: Field<bool> = Field::new("pretty");
const X: Field<bool> = Field::new("x");
const Y: Field<bool> = Field::new("y");

#[test]
fn deeper_candidate_wins_longest_match() {
    let three = object(vec![
        field(&A, argument(string("A"))),
        field(&B, argument(string("B"))),
        field(&C, argument(string("C"))),
    ])
    .map(|_| "three");
    let five = object(vec![
        field(&A, argument(string("A"))),
        field(&B, argument(string("B"))),
        field(&C, argument(string("C"))),
        field(&D, argument(string("D"))),
        field(&E, argument(string("E"))),
    ])
    .map(|_| "five");

    let grammar = longest(vec![three.boxed(), five.boxed()]);
    assert_eq!(parse(&grammar, &["p", "q", "r", "s", "t"]), Ok("five"));
}

#[test]
fn shorter_candidate_wins_when_it_is_the_deepest() {
    let one = object(vec![field(&A, argument(string("A")))]).map(|_| "one");
    let two = object(vec![
        field(&A, argument(string("A"))),
        field(&B, argument(string("B"))),
    ])
    .map(|_| "two");

    let grammar = longest(vec![two.boxed(), one.boxed()]);
    assert_eq!(parse(&grammar, &["only"]), Ok("one"));
}

// The scenario longest + non-empty exist for: a sub-command whose options are
// all defaultable still must distinguish "no options supplied" (fall through
// to the defaults branch) from "options supplied" (the options branch wins).
#[test]
fn all_defaults_branch_yields_to_supplied_options() {
    let options = object(vec![field(&KEY, option(&["--key"], string("KEY")))])
        .non_empty()
        .map(|mut record| format!("key={}", record.take(&KEY).unwrap()));
    let defaults = object(vec![]).map(|_| "defaults".to_string());
    let dev = command("dev", longest(vec![options.boxed(), defaults.boxed()]));

    assert_eq!(parse(&dev, &["dev"]), Ok("defaults".to_string()));
    assert_eq!(
        parse(&dev, &["dev", "--key", "X"]),
        Ok("key=X".to_string())
    );
}

#[test]
fn broken_deepest_candidate_reports_its_own_failure() {
    let options = object(vec![field(&PORT, option(&["--port"], integer("PORT")))])
        .non_empty()
        .map(|_| "options");
    let defaults = object(vec![]).map(|_| "defaults");
    let grammar = longest(vec![options.boxed(), defaults.boxed()]);

    // --port was entered and broke; the defaults branch must not mask that.
    let failure = expect_failure(parse(&grammar, &["--port", "loud"]), ErrorKind::Validation);
    assert!(failure.to_string().contains("--port"));
}

// A deeper candidate that cannot finalize must not claim its consumption:
// the tokens past the eventual winner's stop are nobody's and the pass has
// to say so, not silently drop them.
#[test]
fn unfinalizable_deep_candidate_does_not_swallow_tokens() {
    let deep = object(vec![
        field(&X, flag(&["--x"])),
        field(&Y, flag(&["--y"])),
        field(&PORT, option(&["--port"], integer("PORT"))),
    ])
    .map(|_| "deep");
    let shallow = object(vec![field(&X, flag(&["--x"]))]).map(|_| "shallow");
    let grammar = longest(vec![deep.boxed(), shallow.boxed()]);

    // Both flags match the deep candidate, but its required --port is
    // absent; the shallow candidate must not win while --y goes unclaimed.
    let failure = expect_failure(parse(&grammar, &["--x", "--y"]), ErrorKind::UnexpectedToken);
    assert!(failure.to_string().contains("--y"));

    // With the deep candidate completable it wins outright.
    assert_eq!(parse(&grammar, &["--x", "--y", "--port", "80"]), Ok("deep"));
}

fn modal() -> impl argot_parser::argot::parser::Parser<Value = String> {
    let json = object(vec![field(&PRETTY, flag(&["--pretty"]))])
        .map(|mut record| format!("json pretty={}", record.take(&PRETTY).unwrap()));
    let text = object(vec![field(
        &KEY,
        option(&["--width"], string("WIDTH"))
            .optional()
            .map(|width: Option<String>| width.unwrap_or_default()),
    )])
    .map(|mut record| format!("text width={}", record.take(&KEY).unwrap()));

    conditional(
        argument(string("MODE")).boxed(),
        vec![
            ("json".to_string(), json.boxed()),
            ("text".to_string(), text.boxed()),
        ],
    )
}

#[test]
fn discriminator_routes_to_the_matching_branch() {
    let grammar = modal();
    assert_eq!(
        parse(&grammar, &["json", "--pretty"]),
        Ok("json pretty=true".to_string())
    );
    assert_eq!(
        parse(&grammar, &["text", "--width", "80"]),
        Ok("text width=80".to_string())
    );
}

#[test]
fn branch_defaults_apply_when_only_the_discriminator_is_supplied() {
    let grammar = modal();
    assert_eq!(parse(&grammar, &["json"]), Ok("json pretty=false".to_string()));
}

#[test]
fn unknown_discriminator_value_is_a_hard_failure() {
    let grammar = modal();
    let failure = expect_failure(parse(&grammar, &["xml"]), ErrorKind::UnknownDiscriminator);
    assert!(failure.to_string().contains("xml"));
}

#[test]
fn missing_discriminator_is_missing_required() {
    let grammar = modal();
    expect_failure(parse(&grammar, &[]), ErrorKind::MissingRequired);
}
