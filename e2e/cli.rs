//! Black-box tests for the `phindex` binary, driven via `std::process::Command`.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn phindex_bin() -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_BIN_EXE_phindex"))
}

fn corpus_dir() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("ignorable.PDQ");
    fs::write(
        &file,
        "358c86641a5269ab5b0db5f1b2315c1642cef9652c39b6ced9f646d91f071927\n\
         358c86641a5269ab5b0db5f1b2315c1642cef9652c39b6ced9f646d91f071928\n",
    )
    .unwrap();
    (dir, file)
}

#[test]
fn exact_query_returns_one_match_with_category() {
    let (_dir, file) = corpus_dir();
    let output = Command::new(phindex_bin())
        .arg("--corpus")
        .arg(&file)
        .arg("--query")
        .arg("358c86641a5269ab5b0db5f1b2315c1642cef9652c39b6ced9f646d91f071927:0")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim(), "358c86641a5269ab5b0db5f1b2315c1642cef9652c39b6ced9f646d91f071927\t0\tignorable");
}

#[test]
fn list_categories_flag_prints_labels_and_skips_queries() {
    let (_dir, file) = corpus_dir();
    let output = Command::new(phindex_bin())
        .arg("--corpus")
        .arg(&file)
        .arg("--list-categories")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim(), "ignorable");
}

#[test]
fn bad_hash_size_exits_with_input_invalid_code() {
    let output = Command::new(phindex_bin())
        .arg("--hash-size")
        .arg("254")
        .arg("--word-length")
        .arg("16")
        .arg("--match-threshold")
        .arg("32")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn malformed_query_exits_with_input_invalid_code() {
    let (_dir, file) = corpus_dir();
    let output = Command::new(phindex_bin())
        .arg("--corpus")
        .arg(&file)
        .arg("--query")
        .arg("not-a-valid-query")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn glob_pattern_expands_to_matching_files() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("a.PDQ"),
        "358c86641a5269ab5b0db5f1b2315c1642cef9652c39b6ced9f646d91f071927\n",
    )
    .unwrap();
    fs::write(dir.path().join("notes.txt"), "irrelevant\n").unwrap();
    let pattern = format!("{}/*.PDQ", dir.path().display());
    let output = Command::new(phindex_bin())
        .arg("--corpus")
        .arg(&pattern)
        .arg("--list-categories")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim(), "a");
}
