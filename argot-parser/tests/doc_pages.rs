//! Documentation extraction from grammar structure

use argot_parser::argot::constructs::{field, object, one_of, Field};
use argot_parser::argot::docs::{document, usage_line, UsageKind};
use argot_parser::argot::modifiers::with_default;
use argot_parser::argot::parser::{Parser, ParserExt};
use argot_parser::argot::primitives::{argument, command, flag, option};
use argot_parser::argot::value::stock::{integer, string};
use insta::assert_snapshot;

const PORT: Field<i64> = Field::new("port");
const VERBOSE: Field<bool> = Field::new("verbose");
const FILE: Field<String> = Field::new("file");

fn tool() -> impl Parser<Value = argot_parser::argot::constructs::Record> {
    object(vec![
        field(
            &PORT,
            with_default(
                option(&["--port", "-p"], integer("PORT")).describe("port to listen on"),
                3000,
            )
            .shown_as("3000"),
        ),
        field(&VERBOSE, flag(&["-v", "--verbose"]).describe("log more")),
        field(&FILE, argument(string("FILE")).describe("input file")),
    ])
    .titled("Options")
    .brief("a small demonstration tool")
}

#[test]
fn usage_line_reflects_grammar_shape() {
    let grammar = tool();
    assert_snapshot!(
        usage_line("tool", &grammar.usage()),
        @"usage: tool [--port PORT] [-v] FILE"
    );
}

#[test]
fn hidden_terms_vanish_from_usage_but_not_matching() {
    let grammar = object(vec![
        field(&PORT, option(&["--port"], integer("PORT")).hidden()),
        field(&FILE, argument(string("FILE"))),
    ]);
    assert_snapshot!(usage_line("tool", &grammar.usage()), @"usage: tool FILE");

    // Still fully matchable.
    let mut record =
        argot_parser::argot::matching::parse(&grammar, &["--port", "80", "in.txt"]).unwrap();
    assert_eq!(record.take(&PORT), Some(80));
}

#[test]
fn page_collects_entries_with_descriptions_and_defaults() {
    let page = document(&tool());

    assert_eq!(page.brief.as_ref().map(|b| b.to_string()).as_deref(), Some("a small demonstration tool"));
    assert_eq!(page.sections.len(), 1);

    let section = &page.sections[0];
    assert_eq!(section.title.as_deref(), Some("Options"));
    assert_eq!(section.entries.len(), 3);

    assert_eq!(section.entries[0].default.as_deref(), Some("3000"));
    assert_eq!(
        section.entries[0].description.as_ref().map(|d| d.to_string()).as_deref(),
        Some("port to listen on")
    );
    assert!(matches!(
        &section.entries[2].term.kind,
        UsageKind::Argument { metavar } if metavar == "FILE"
    ));
}

#[test]
fn command_usage_nests_under_exclusive_groups() {
    let serve = command("serve", object(vec![field(&PORT, option(&["--port"], integer("PORT")))]));
    let echo = command("echo", object(vec![field(&FILE, argument(string("TEXT")))]));
    let cli = one_of(vec![serve.boxed(), echo.boxed()]);

    assert_snapshot!(
        usage_line("tool", &cli.usage()),
        @"usage: tool (serve --port PORT | echo TEXT)"
    );
}

#[test]
fn doc_page_serializes_for_external_renderers() {
    let page = document(&tool());
    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json["sections"][0]["title"], "Options");
    assert_eq!(json["sections"][0]["entries"][0]["default"], "3000");
}
