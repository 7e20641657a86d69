//! Completion suggestions through the replay walk

use argot_parser::argot::constructs::{field, object, one_of, Field};
use argot_parser::argot::context::Annotations;
use argot_parser::argot::parser::ParserExt;
use argot_parser::argot::primitives::{command, flag, option};
use argot_parser::argot::suggest::{complete, FileKind, Suggestion};
use argot_parser::argot::value::stock::{choice, integer, path, string};

const PORT: Field<i64> = Field::new("port");
const FORMAT: Field<String> = Field::new("format");
const INPUT: Field<std::path::PathBuf> = Field::new("input");
const QUIET: Field<bool> = Field::new("quiet");

fn cli() -> impl argot_parser::argot::parser::Parser<Value = argot_parser::argot::constructs::Record>
{
    let serve = command(
        "serve",
        object(vec![
            field(&PORT, option(&["--port"], integer("PORT"))),
            field(&QUIET, flag(&["--quiet"])),
        ]),
    )
    .brief("start the server");
    let convert = command(
        "convert",
        object(vec![
            field(
                &FORMAT,
                option(&["--format"], choice("FORMAT", ["json", "text", "yaml"])),
            ),
            field(&INPUT, option(&["--input"], path("FILE"))),
        ]),
    );
    one_of(vec![serve.boxed(), convert.boxed()])
}

fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

fn texts(suggestions: &[Suggestion]) -> Vec<String> {
    suggestions
        .iter()
        .filter_map(|s| s.text().map(str::to_string))
        .collect()
}

#[test]
fn empty_line_offers_all_command_names() {
    let ctx = Annotations::new();
    let suggestions = complete(&cli(), &[], "", &ctx);
    assert_eq!(texts(&suggestions), vec!["serve", "convert"]);
}

#[test]
fn command_brief_travels_with_the_suggestion() {
    let ctx = Annotations::new();
    let suggestions = complete(&cli(), &[], "s", &ctx);
    assert_eq!(
        suggestions,
        vec![Suggestion::literal_with("serve", "start the server")]
    );
}

#[test]
fn committed_command_offers_only_its_own_options() {
    let ctx = Annotations::new();
    let suggestions = complete(&cli(), &args(&["serve"]), "--", &ctx);
    assert_eq!(texts(&suggestions), vec!["--port", "--quiet"]);
}

#[test]
fn already_supplied_option_is_not_offered_again() {
    let ctx = Annotations::new();
    let suggestions = complete(&cli(), &args(&["serve", "--port", "80"]), "--", &ctx);
    assert_eq!(texts(&suggestions), vec!["--quiet"]);
}

#[test]
fn inline_value_prefix_completes_the_value() {
    let ctx = Annotations::new();
    let suggestions = complete(&cli(), &args(&["convert"]), "--format=j", &ctx);
    assert_eq!(texts(&suggestions), vec!["--format=json"]);
}

#[test]
fn file_valued_option_defers_to_filesystem_completion() {
    let ctx = Annotations::new();
    let suggestions = complete(&cli(), &args(&["convert"]), "--input=", &ctx);
    assert_eq!(
        suggestions,
        vec![Suggestion::File {
            pattern: None,
            kind: Some(FileKind::Any),
            extensions: vec![],
        }]
    );
}

// Completion front ends dispatch on the "kind" tag; the file variant's own
// kind field serializes under a different name so the two never collide.
#[test]
fn suggestions_serialize_with_a_variant_tag() {
    let literal = serde_json::to_value(Suggestion::literal("serve")).unwrap();
    assert_eq!(literal["kind"], "literal");

    let file = serde_json::to_value(Suggestion::File {
        pattern: None,
        kind: Some(FileKind::Any),
        extensions: vec![],
    })
    .unwrap();
    assert_eq!(file["kind"], "file");
    assert_eq!(file["file_kind"], "any");
}

#[test]
fn half_typed_trailing_token_still_yields_candidates() {
    // "--po" is the prefix being completed, not a consumed token.
    let ctx = Annotations::new();
    let suggestions = complete(&cli(), &args(&["serve"]), "--po", &ctx);
    assert_eq!(texts(&suggestions), vec!["--port"]);
}
