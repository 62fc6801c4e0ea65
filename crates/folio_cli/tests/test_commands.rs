//! CLI integration tests

use folio_test_helpers::prelude::*;
use predicates::prelude::*;
use serde_json::Value;

#[test]
fn test_folio_help() {
    folio_command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Folio"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("mcp"));
}

#[test]
fn test_folio_version() {
    folio_command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_command_is_usage_error() {
    folio_command().arg("publish").assert().code(2);
}

#[test]
fn test_invalid_port_is_usage_error() {
    folio_command()
        .args(["serve", "--port", "eighty"])
        .assert()
        .code(2);
}

#[test]
fn test_show_requires_credentials() {
    folio_command()
        .arg("show")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("SUPABASE_URL"))
        .stderr(predicate::str::contains("SUPABASE_ANON_KEY"));
}

#[test]
fn test_add_requires_credentials() {
    folio_command()
        .args(["add", "home", "--title", "Home"])
        .env("SUPABASE_ANON_KEY", "anon")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("SUPABASE_URL"))
        .stderr(stderr_not_contains(&["SUPABASE_ANON_KEY"]));
}

#[test]
fn test_bad_config_file_is_reported() {
    let (_dir, path) = config_file("[store\nmax_attempts = ");

    folio_command()
        .args(["mcp", "--memory"])
        .env("FOLIO_CONFIG", &path)
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse"));
}

#[test]
fn test_mcp_memory_session() {
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#, "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#, "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"addItem","arguments":{"id":"Docs"}}}"#, "\n",
        r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"addItem","arguments":{"id":"docs"}}}"#, "\n",
        r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"getConfig","arguments":{}}}"#, "\n",
    );

    let output = command_for("folio")
        .args(["mcp", "--memory"])
        .write_stdin(input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(responses.len(), 4);
    assert_eq!(tool_text(&responses[1]["result"]), "Item 'docs' added successfully");
    assert_eq!(
        tool_text(&responses[2]["result"]),
        "Failed to add item: Item with id 'docs' already exists"
    );

    let doc: Value = serde_json::from_str(&tool_text(&responses[3]["result"])).unwrap();
    assert_eq!(page_ids(&doc), vec!["docs"]);
    assert_eq!(doc["sidebar"][0]["label"], "Docs");
}
