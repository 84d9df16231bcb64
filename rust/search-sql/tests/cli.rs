mod support;

use pretty_assertions::assert_eq;
use clap::Parser;
use search_sql::{resolve_json, Cli, DialectKind, SearchSqlError};
use serde_json::{json, Value};
use std::path::PathBuf;

const TICKETS: &str = r#"{
    "schema": {
        "tables": "tickets t",
        "fields": [
            {"name": "id", "column": "t.id", "type": "integer"},
            {"name": "title", "column": "t.title"},
            {"name": "opened", "column": "t.opened_at", "alias": "opened_at", "type": "date_time"}
        ],
        "join_cond": "t.archived = 0"
    },
    "request": {
        "filters": [
            {"field": "title", "op": "ct", "values": ["disk"], "ignore_case": true},
            {"field": "opened", "op": "Between", "values": ["2024-01-01", null]}
        ],
        "sort": "opened",
        "order": "desc",
        "limit": 5
    },
    "numbered": true
}"#;

#[test]
fn resolves_json_documents() {
    let output = resolve_json(&support::resolver(DialectKind::Postgres), TICKETS).unwrap();
    let output: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(
        output,
        json!({
            "list_sql": "select t.id id, t.title title, t.opened_at opened_at from tickets t where (t.archived = 0) and upper(t.title) like $1 and to_char(t.opened_at, 'YYYY-MM-DD') >= $2 order by opened_at desc limit $3 offset $4",
            "list_params": [
                {"t": "text", "v": "%DISK%"},
                {"t": "text", "v": "2024-01-01"},
                {"t": "int", "v": 5},
                {"t": "int", "v": 0}
            ],
            "count_sql": "select count(1) from tickets t where (t.archived = 0) and upper(t.title) like $1 and to_char(t.opened_at, 'YYYY-MM-DD') >= $2",
            "count_params": [
                {"t": "text", "v": "%DISK%"},
                {"t": "text", "v": "2024-01-01"}
            ],
            "aliases": ["id", "title", "opened_at"],
            "limit": 5,
            "offset": 0
        })
    );
}

#[test]
fn request_section_is_optional() {
    let input = r#"{"schema": {"tables": "tags", "fields": [{"name": "name", "column": "name"}]}}"#;

    let output = resolve_json(&support::mysql(), input).unwrap();
    let output: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(output["list_sql"], "select name name from tags limit ?, ?");
    assert_eq!(output["count_sql"], "select count(1) from tags");
}

#[test]
fn rejects_unknown_operator_tokens() {
    let input = r#"{
        "schema": {"tables": "tags", "fields": [{"name": "name", "column": "name"}]},
        "request": {"filters": [{"field": "name", "op": "like", "values": ["a"]}]}
    }"#;

    let err = resolve_json(&support::mysql(), input).unwrap_err();
    assert!(format!("{err:#}").contains("unknown operator 'like'"), "{err:#}");
}

#[test]
fn rejects_invalid_schemas() {
    let input = r#"{"schema": {"tables": "  ", "fields": [{"name": "name", "column": "name"}]}}"#;

    let err = resolve_json(&support::mysql(), input).unwrap_err();
    assert!(format!("{err:#}").contains("tables"), "{err:#}");
}

#[test]
fn surfaces_resolution_errors() {
    let input = r#"{
        "schema": {"tables": "tags", "fields": [{"name": "name", "column": "name"}]},
        "request": {"filters": [{"field": "name", "op": "bt", "values": ["a"]}]}
    }"#;

    let err = resolve_json(&support::mysql(), input).unwrap_err();
    let err = err
        .downcast_ref::<SearchSqlError>()
        .expect("resolution errors keep their type");
    assert!(matches!(err, SearchSqlError::Arity { op: "Between", .. }));
}

#[test]
fn input_path_is_optional() {
    let cli = Cli::try_parse_from(["search-sql"]).unwrap();
    assert_eq!(cli.input, None);

    let cli = Cli::try_parse_from(["search-sql", "request.json"]).unwrap();
    assert_eq!(cli.input, Some(PathBuf::from("request.json")));

    let cli = Cli::try_parse_from(["search-sql", "-"]).unwrap();
    assert_eq!(cli.input, Some(PathBuf::from("-")));

    assert!(Cli::try_parse_from(["search-sql", "a.json", "b.json"]).is_err());
}
