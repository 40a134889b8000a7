// Contract tests: exit codes and the guarantees around the safety check and
// converter selection. These never assert on converter output details.

mod common;

use common::{git_available, git_init, run_cli, run_cli_with_env, write};

#[test]
fn help_lists_every_converter() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["--help"]);
    assert_eq!(code, 0);
    for id in ["commit-spec", "editorconfig", "gitlab-ci"] {
        assert!(stdout.contains(id), "help should mention {id}: {stdout}");
    }
    assert!(stdout.contains("--force"));
    assert!(stdout.contains("--lint-staged"));
}

#[test]
fn invalid_converter_exits_one_and_lists_choices() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["prettier", "--force"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("invalid converter choice 'prettier'"), "{stderr}");
    assert!(stderr.contains("- commit-spec"), "{stderr}");
    assert!(stderr.contains("- gitlab-ci"), "{stderr}");

    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert!(entries.is_empty(), "nothing should be written");
}

#[test]
fn dirty_tree_blocks_without_force() {
    if !git_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    git_init(dir.path());
    write(dir.path(), "notes.txt", "work in progress\n");

    let (_, stderr, code) = run_cli(dir.path(), &["editorconfig"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("stash or commit"), "{stderr}");
    assert!(stderr.contains("--force"), "{stderr}");
    assert!(!dir.path().join(".editorconfig").exists());
}

#[test]
fn dirty_tree_blocks_before_converter_validation() {
    if !git_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    git_init(dir.path());
    write(dir.path(), "notes.txt", "work in progress\n");

    let (_, stderr, code) = run_cli(dir.path(), &["prettier"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("stash or commit"), "{stderr}");
    assert!(!stderr.contains("invalid converter"), "{stderr}");
}

#[test]
fn force_continues_past_dirty_tree_with_warning() {
    if !git_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    git_init(dir.path());
    write(dir.path(), "notes.txt", "work in progress\n");

    let (stdout, _, code) = run_cli(dir.path(), &["editorconfig", "--force"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("WARNING: Forcibly continuing."), "{stdout}");
    assert!(dir.path().join(".editorconfig").is_file());
}

#[test]
fn non_repository_is_not_blocked_under_translated_git() {
    if !git_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli_with_env(
        dir.path(),
        &["editorconfig"],
        &[("LANG", "de_DE.UTF-8"), ("LANGUAGE", "de")],
    );
    assert_eq!(code, 0, "{stderr}");
    assert!(dir.path().join(".editorconfig").is_file());
}

#[test]
fn clean_repository_is_not_blocked() {
    if !git_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    git_init(dir.path());

    let (stdout, _, code) = run_cli(dir.path(), &["editorconfig"]);
    assert_eq!(code, 0);
    assert!(!stdout.contains("Forcibly"), "{stdout}");
    assert!(dir.path().join(".editorconfig").is_file());
}

#[test]
fn commit_spec_without_node_modules_exits_one() {
    let dir = common::project("{\n  \"name\": \"app\"\n}\n");
    let (_, stderr, code) = run_cli(dir.path(), &["commit-spec", "--force"]);
    assert_eq!(code, 1);
    assert!(
        stderr.contains("Did you forget to npm init or npm install?"),
        "{stderr}"
    );
    assert_eq!(
        common::read(dir.path(), "package.json"),
        "{\n  \"name\": \"app\"\n}\n"
    );
}
