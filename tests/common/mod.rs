// Shared helpers for the integration tests: run the built binary inside a
// throwaway project directory.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub fn binary_path() -> PathBuf {
    let path = PathBuf::from(env!("CARGO_BIN_EXE_commition"));
    assert!(path.exists(), "binary not found at {}", path.display());
    path
}

/// Runs the binary in `dir` with the given args.
/// Returns (stdout, stderr, exit_code).
pub fn run_cli(dir: &Path, args: &[&str]) -> (String, String, i32) {
    run_cli_with_env(dir, args, &[])
}

/// Like [`run_cli`], with extra environment variables for the child.
pub fn run_cli_with_env(dir: &Path, args: &[&str], envs: &[(&str, &str)]) -> (String, String, i32) {
    let output = Command::new(binary_path())
        .args(args)
        .envs(envs.iter().copied())
        .current_dir(dir)
        .env_remove("COMMITION_LOG")
        .env("NO_COLOR", "1")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("failed to execute binary");

    let stdout = String::from_utf8(output.stdout).expect("stdout not valid UTF-8");
    let stderr = String::from_utf8(output.stderr).expect("stderr not valid UTF-8");
    let exit_code = output.status.code().unwrap_or(-1);
    (stdout, stderr, exit_code)
}

/// Without git on PATH the safety check treats every tree as dirty, so
/// tests that run without `--force` need it.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|status| status.success())
}

pub fn git_init(dir: &Path) {
    let status = Command::new("git")
        .args(["init", "-q"])
        .current_dir(dir)
        .status()
        .expect("failed to run git init");
    assert!(status.success(), "git init failed in {}", dir.display());
}

/// A temp directory holding a `package.json` with `manifest` as its content.
pub fn project(manifest: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    write(dir.path(), "package.json", manifest);
    dir
}

pub fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create parent dir");
    }
    fs::write(&path, content).expect("failed to write fixture");
}

pub fn read(dir: &Path, relative: &str) -> String {
    fs::read_to_string(dir.join(relative))
        .unwrap_or_else(|e| panic!("failed to read {relative}: {e}"))
}

/// A directory of no-op executables named `tools`, for standing in for npm
/// and friends. Returns the directory and a `PATH` with it in front.
#[cfg(unix)]
pub fn stub_tools(tools: &[&str]) -> (tempfile::TempDir, String) {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().expect("failed to create stub dir");
    for tool in tools {
        let path = dir.path().join(tool);
        fs::write(&path, "#!/bin/sh\nexit 0\n").expect("failed to write stub");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("failed to mark stub executable");
    }
    let mut entries = vec![dir.path().to_path_buf()];
    if let Some(current) = std::env::var_os("PATH") {
        entries.extend(std::env::split_paths(&current));
    }
    let path = std::env::join_paths(entries)
        .expect("failed to build PATH")
        .to_string_lossy()
        .into_owned();
    (dir, path)
}
