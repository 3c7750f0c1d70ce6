use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn actionflow(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_actionflow"))
        .args(args)
        .arg("--no-color")
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir)
        .env("HOME", dir)
        .env_remove("ACTIONFLOW_LOG")
        .output()
        .unwrap()
}

fn workspace(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, content) in files {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

#[test]
fn test_check_clean_file() {
    let dir = workspace(&[("main.workflow", "action \"a\" {\n  uses = \"./ci\"\n}\n")]);
    let output = actionflow(dir.path(), &["check", "main.workflow"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No problems found in 1 file"));
}

#[test]
fn test_check_reports_location_and_excerpt() {
    let dir = workspace(&[("main.workflow", "action \"a\" {\n  uses = \"ci\"\n}\n")]);
    let output = actionflow(dir.path(), &["check", "main.workflow", "--context", "0"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("error[E025]: The 'uses' property must be"));
    assert!(stderr.contains("--> main.workflow:2:10"));
    assert!(stderr.contains("  2 |   uses = \"ci\"\n    |          ^^^^"));
    assert!(String::from_utf8_lossy(&output.stdout).contains("1 error, 0 warnings in 1 file"));
}

#[test]
fn test_warnings_only_fail_when_requested() {
    let source = "action \"a\" {\n  uses = \"./a\"\n  secrets = [\"T\", \"T\"]\n}\n";
    let dir = workspace(&[("main.workflow", source)]);

    assert!(actionflow(dir.path(), &["check", "main.workflow"]).status.success());
    assert_eq!(
        actionflow(dir.path(), &["check", "main.workflow", "--warnings-as-errors"])
            .status
            .code(),
        Some(1)
    );
}

#[test]
fn test_config_file_enables_warnings_as_errors() {
    let source = "action \"a\" {\n  uses = \"./a\"\n  secrets = [\"T\", \"T\"]\n}\n";
    let dir = workspace(&[("main.workflow", source), (".actionflowrc", "warnings_as_errors = true\n")]);

    assert_eq!(actionflow(dir.path(), &["check", "main.workflow"]).status.code(), Some(1));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = workspace(&[]);
    let output = actionflow(dir.path(), &["check", "missing.workflow"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read missing.workflow"));
}

#[test]
fn test_fmt_rewrites_file() {
    let dir = workspace(&[("main.workflow", "action \"a\"{uses=\"./a\"}")]);
    let output = actionflow(dir.path(), &["fmt", "main.workflow"]);

    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("main.workflow")).unwrap(),
        "action \"a\" {\n  uses = \"./a\"\n}\n"
    );
}

#[test]
fn test_fmt_check_leaves_file_alone() {
    let source = "action \"a\"{uses=\"./a\"}";
    let dir = workspace(&[("main.workflow", source)]);
    let output = actionflow(dir.path(), &["fmt", "--check", "main.workflow"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Would reformat main.workflow"));
    assert_eq!(fs::read_to_string(dir.path().join("main.workflow")).unwrap(), source);
}

#[test]
fn test_fmt_uses_configured_indent() {
    let dir = workspace(&[
        ("main.workflow", "action \"a\" { uses = \"./a\" }"),
        (".actionflowrc", "use_tabs = true\n"),
    ]);

    assert!(actionflow(dir.path(), &["fmt", "main.workflow"]).status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("main.workflow")).unwrap(),
        "action \"a\" {\n\tuses = \"./a\"\n}\n"
    );
}

#[test]
fn test_fmt_skips_files_with_syntax_errors() {
    let source = "action \"a\" { uses = }";
    let dir = workspace(&[("main.workflow", source)]);
    let output = actionflow(dir.path(), &["fmt", "main.workflow"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Skipped main.workflow"));
    assert_eq!(fs::read_to_string(dir.path().join("main.workflow")).unwrap(), source);
}

#[test]
fn test_config_init_and_show() {
    let dir = workspace(&[]);

    assert!(actionflow(dir.path(), &["config", "--init"]).status.success());
    assert!(dir.path().join(".actionflowrc").is_file());
    assert!(!actionflow(dir.path(), &["config", "--init"]).status.success());

    let output = actionflow(dir.path(), &["config"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Configuration: ./.actionflowrc"));
    assert!(stdout.contains("context_lines = 2"));
}
