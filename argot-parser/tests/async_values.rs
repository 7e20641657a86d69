//! Async value parsers and mode contagion

use argot_parser::argot::constructs::{field, object, Field};
use argot_parser::argot::context::Annotations;
use argot_parser::argot::error::ErrorKind;
use argot_parser::argot::matching::{parse, parse_async};
use argot_parser::argot::message::Message;
use argot_parser::argot::parser::{Mode, Parser};
use argot_parser::argot::primitives::option;
use argot_parser::argot::value::custom::custom_async;
use argot_parser::argot::value::stock::integer;

const USER: Field<u64> = Field::new("user");
const PORT: Field<i64> = Field::new("port");

/// Stands in for a directory lookup: resolves a login name to a numeric id.
fn user_lookup() -> impl argot_parser::argot::value::ValueParser<Output = u64> {
    custom_async(
        "USER",
        |token| {
            Box::pin(async move {
                match token.as_str() {
                    "alice" => Ok(1001),
                    "bob" => Ok(1002),
                    _ => Err(Message::new().text("unknown user").value(token)),
                }
            })
        },
        |id| id.to_string(),
    )
}

fn grammar() -> impl Parser<Value = argot_parser::argot::constructs::Record> {
    object(vec![
        field(&USER, option(&["--user"], user_lookup())),
        field(&PORT, option(&["--port"], integer("PORT"))),
    ])
}

#[test]
fn one_async_value_makes_the_whole_tree_async() {
    assert_eq!(grammar().mode(), Mode::Async);
}

#[test]
fn sync_entry_point_refuses_async_grammars() {
    let err = parse(&grammar(), &["--user", "alice", "--port", "1"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ModeMismatch);
}

#[tokio::test]
async fn async_finalize_resolves_deferred_values() {
    let ctx = Annotations::new();
    let mut record = parse_async(&grammar(), &["--user", "alice", "--port", "8080"], &ctx)
        .await
        .unwrap();
    assert_eq!(record.take(&USER), Some(1001));
    assert_eq!(record.take(&PORT), Some(8080));
}

#[tokio::test]
async fn async_validation_surfaces_at_finalize() {
    let ctx = Annotations::new();
    let err = parse_async(&grammar(), &["--user", "mallory", "--port", "1"], &ctx)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("mallory"));
}

#[tokio::test]
async fn sync_grammars_run_through_the_async_entry_point_too() {
    let ctx = Annotations::new();
    let port = option(&["--port"], integer("PORT"));
    assert_eq!(parse_async(&port, &["--port", "80"], &ctx).await, Ok(80));
}
