use std::path::Path;
use std::process::{Command, Output};

fn srcsnip_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_srcsnip"));
    cmd.current_dir(dir);
    cmd.env_remove("SRCSNIP_LOG");
    cmd
}

fn run_in_fixture(args: &[&str]) -> Output {
    srcsnip_cmd(Path::new("tests/fixtures/project")).args(args).output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn show_prints_numbered_function() {
    let out = run_in_fixture(&["show", "src/net.c", "connect_to"]);
    assert!(out.status.success(), "show failed: {}", stderr(&out));

    let text = stdout(&out);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.first(), Some(&"11: int connect_to(const char *host, int port)"));
    assert_eq!(lines.last(), Some(&"18: }"));
    assert_eq!(lines.len(), 8);
}

#[test]
fn show_escalates_to_class() {
    let out = run_in_fixture(&["show", "src/shapes.cpp", "Square", "--json"]);
    assert!(out.status.success(), "show failed: {}", stderr(&out));

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["kind"], "class");
    assert_eq!(json["entity_name"], "Square");
    assert_eq!(json["extent"]["start"], 11);
    assert_eq!(json["extent"]["end"], 20);
}

#[test]
fn show_skips_pure_virtual_declaration() {
    let out = run_in_fixture(&["show", "src/shapes.cpp", "area", "--json"]);
    assert!(out.status.success(), "show failed: {}", stderr(&out));

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["kind"], "function");
    assert_eq!(json["extent"]["start"], 14);
    assert_eq!(json["extent"]["end"], 16);
    assert_eq!(json["non_blank_lines"][1], "return side_ * side_;");
}

#[test]
fn show_header_passes_through() {
    let out = run_in_fixture(&["show", "include/net.h", "whatever", "--json"]);
    assert!(out.status.success(), "show failed: {}", stderr(&out));

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["kind"], "header");
    assert_eq!(json["extent"]["start"], 1);
    assert_eq!(json["extent"]["end"], 7);
}

#[test]
fn show_missing_entity_fails_with_candidates() {
    let out = run_in_fixture(&["show", "src/net.c", "Close_All"]);
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("Entity Not Found"));
    assert!(err.contains("Did you mean `close_all`?"));
}

#[test]
fn show_rejects_unsupported_extension() {
    let out = run_in_fixture(&["show", "notes.txt", "connect_to"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Unsupported Extension"));
}

#[test]
fn context_always_succeeds_with_text() {
    let out = run_in_fixture(&["context", "src/net.c", "listen_on"]);
    assert!(out.status.success());
    assert_eq!(
        stdout(&out).trim_end(),
        "Function 'listen_on' not found in src/net.c. The function name must exist in src/net.c."
    );

    let out = run_in_fixture(&["context", "src/net.c", "close_all"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "20: void close_all(void) {\n21:     open_count = 0;\n22: }\n");
}

#[test]
fn list_prints_definitions_in_order() {
    let out = run_in_fixture(&["list", "src/shapes.cpp"]);
    assert!(out.status.success(), "list failed: {}", stderr(&out));

    let names: Vec<String> = stdout(&out)
        .lines()
        .filter_map(|l| l.split_whitespace().last().map(String::from))
        .collect();
    assert_eq!(names, ["Shape", "Square", "area", "total_area"]);
}

#[test]
fn config_can_disable_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("legacy.c"), b"/* \xff */\nint sum(int a) {\n    return a;\n}\n")
        .unwrap();

    let out = srcsnip_cmd(dir.path()).args(["show", "legacy.c", "sum"]).output().unwrap();
    assert!(out.status.success(), "fallback show failed: {}", stderr(&out));
    assert!(stdout(&out).starts_with("2: int sum(int a) {"));

    std::fs::write(dir.path().join(".srcsnip.toml"), "lexical_fallback = false\n").unwrap();
    let out = srcsnip_cmd(dir.path()).args(["show", "legacy.c", "sum"]).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn malformed_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.c"), "int a(void) { return 0; }\n").unwrap();
    std::fs::write(dir.path().join(".srcsnip.toml"), "max_file_bytes = -\n").unwrap();

    let out = srcsnip_cmd(dir.path()).args(["show", "a.c", "a"]).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Invalid Config"));
}
