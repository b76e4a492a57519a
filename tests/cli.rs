// End-to-end checks of the cstjson binary: exit codes, stdout, stderr.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn cstjson() -> Command {
    let mut cmd = Command::cargo_bin("cstjson").unwrap();
    for var in [
        "CSTJSON_STRATEGY",
        "CSTJSON_PRETTY",
        "CSTJSON_MAX_INPUT_BYTES",
        "CSTJSON_CALL_LIMIT",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn one_line(text: &str) -> bool {
    text.lines().count() == 1
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn empty_stdin_encodes_the_empty_program() {
    cstjson()
        .arg("Java")
        .write_stdin("")
        .assert()
        .success()
        .stdout(r#"{"compilationUnit":[{"c":0,"l":1,"text":"","type":"EOI"}]}"#);
}

#[test]
fn unsupported_language_fails_without_output() {
    cstjson()
        .arg("Cobol")
        .write_stdin("IDENTIFICATION DIVISION.")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(contains("Invalid parser selected: Cobol"));
}

#[test]
fn missing_file_is_an_io_failure() {
    let dir = tempfile::tempdir().unwrap();
    cstjson()
        .arg("Java")
        .arg(dir.path().join("Nope.java"))
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(contains("Could not read"));
}

#[test]
fn minimal_program_is_fully_encoded() {
    cstjson()
        .arg("Java")
        .write_stdin("class A {}")
        .assert()
        .success()
        .stdout(concat!(
            r#"{"compilationUnit":[{"typeDeclaration":[{"classDeclaration":["#,
            r#"{"c":0,"l":1,"text":"class","type":"CLASS"},"#,
            r#"{"c":5,"l":1,"text":" ","type":"WHITESPACE"},"#,
            r#"{"c":6,"l":1,"text":"A","type":"Identifier"},"#,
            r#"{"c":7,"l":1,"text":" ","type":"WHITESPACE"},"#,
            r#"{"classBody":[{"c":8,"l":1,"text":"{","type":"LBRACE"},"#,
            r#"{"c":9,"l":1,"text":"}","type":"RBRACE"}]}"#,
            r#"]}]},{"c":10,"l":1,"text":"","type":"EOI"}]}"#
        ));
}

#[test]
fn syntax_error_fails_fast_with_one_message() {
    cstjson()
        .arg("Java")
        .write_stdin("class A { int = ; void }\nclass {")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(contains("Input does not match the Java grammar at line 1").and(predicate::function(one_line)));
}

#[test]
fn explain_renders_a_diagnostic_report() {
    cstjson()
        .args(["Json", "--explain"])
        .write_stdin("{\"a\" 1}")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(contains("cstjson::syntax"));
}

#[test]
fn argument_mismatch_is_invalid_arguments() {
    cstjson()
        .assert()
        .code(1)
        .stderr(contains("Invalid arguments"));

    cstjson()
        .args(["Java", "A.java", "B.java"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(contains("Invalid arguments").and(predicate::function(one_line)));
}

#[test]
fn help_and_version_succeed() {
    cstjson().arg("--help").assert().success().stdout(contains("LANGUAGE"));
    cstjson().arg("--version").assert().success().stdout(contains("cstjson"));
}

// ============================================================================
// LIMITS
// ============================================================================

#[test]
fn call_limit_is_resource_exhaustion() {
    cstjson()
        .args(["Java", "--call-limit", "10"])
        .arg(common::fixture_path("Hello.java"))
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(contains("Resource exhausted while parsing"));
}

#[test]
fn call_limit_from_environment() {
    cstjson()
        .arg("Java")
        .env("CSTJSON_CALL_LIMIT", "10")
        .write_stdin("class A { void f() { g(); } }")
        .assert()
        .code(1)
        .stderr(contains("Resource exhausted"));
}

#[test]
fn deeply_nested_input_is_resource_exhaustion() {
    let source = format!("{}{}", "[".repeat(20_000), "]".repeat(20_000));
    cstjson()
        .arg("Json")
        .write_stdin(source)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(contains("Resource exhausted while parsing").and(predicate::function(one_line)));
}

#[test]
fn oversized_input_is_resource_exhaustion() {
    cstjson()
        .args(["Json", "--max-input-bytes", "4"])
        .write_stdin("[1, 2, 3]")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(contains("Resource exhausted while loading"));

    cstjson()
        .args(["Json", "--max-input-bytes", "4"])
        .arg(common::fixture_path("package.json"))
        .assert()
        .code(1)
        .stderr(contains("Resource exhausted while loading"));
}

#[test]
fn undecodable_input_is_an_io_failure() {
    cstjson()
        .arg("Json")
        .write_stdin(vec![b'"', 0xff, b'"'])
        .assert()
        .code(1)
        .stderr(contains("not valid UTF-8"));
}

// ============================================================================
// OUTPUT OPTIONS
// ============================================================================

#[test]
fn strategies_produce_identical_documents() {
    for (language, fixture) in [("Java", "Hello.java"), ("Hcl", "main.tf"), ("Json", "package.json")] {
        let path = common::fixture_path(fixture);
        let stream = cstjson().arg(language).arg(&path).output().unwrap();
        let materialize = cstjson()
            .args([language, "--strategy", "materialize"])
            .arg(&path)
            .output()
            .unwrap();
        assert!(stream.status.success(), "{}", String::from_utf8_lossy(&stream.stderr));
        assert!(materialize.status.success());
        assert_eq!(stream.stdout, materialize.stdout, "{}", fixture);
    }
}

#[test]
fn pretty_output_is_the_same_document() {
    let path = common::fixture_path("main.tf");
    let compact = cstjson().arg("Hcl").arg(&path).output().unwrap();
    let pretty = cstjson()
        .arg("Hcl")
        .arg(&path)
        .env("CSTJSON_PRETTY", "true")
        .output()
        .unwrap();
    assert!(pretty.stdout.starts_with(b"{\n  \"configFile\": ["));

    let compact: serde_json::Value = serde_json::from_slice(&compact.stdout).unwrap();
    let pretty: serde_json::Value = serde_json::from_slice(&pretty.stdout).unwrap();
    assert_eq!(compact, pretty);
}

#[test]
fn fixtures_round_trip_through_the_binary() {
    for (language, fixture) in [("Java", "Hello.java"), ("Hcl", "main.tf"), ("Json", "package.json")] {
        let output = cstjson()
            .arg(language)
            .arg(common::fixture_path(fixture))
            .output()
            .unwrap();
        assert!(output.status.success(), "{}", fixture);
        let document: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let tokens = common::tokens(&document).unwrap();
        assert_eq!(common::reassemble(&tokens), common::fixture(fixture));
        assert!(common::positions_are_monotone(&tokens));
        assert_eq!(tokens.last().map(|t| t.kind.as_str()), Some("EOI"));
    }
}

#[test]
fn list_languages_prints_the_registry() {
    let output = cstjson().arg("--list-languages").output().unwrap();
    assert!(output.status.success());
    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = entries
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|entry| entry["name"].as_str())
        .collect();
    assert_eq!(names, ["Java", "Json", "Hcl"]);
}

#[test]
fn verbose_logging_stays_on_stderr() {
    cstjson()
        .args(["Json", "-vv"])
        .write_stdin("[]")
        .assert()
        .success()
        .stdout(r#"{"document":[{"value":[{"array":[{"c":0,"l":1,"text":"[","type":"LBRACK"},{"c":1,"l":1,"text":"]","type":"RBRACK"}]}]},{"c":2,"l":1,"text":"","type":"EOI"}]}"#)
        .stderr(contains("parse finished"));
}
