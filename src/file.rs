//! File loading for the CLI front-end: expanding glob patterns / directory
//! paths into a flat file list, then reading newline-delimited hex hashes
//! from each one.
//!
//! This is external-collaborator glue (spec §1): the core `Index` never
//! touches the filesystem. Directory expansion reuses the teacher's
//! `walkdir`-based recursive-file-list pattern; glob-pattern expansion
//! (`*.PDQ`) uses the `glob` crate, already depended on elsewhere in this
//! corpus for the same purpose.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Expand a mixed list of literal paths, directories, and glob patterns
/// into a flat list of regular files.
///
/// - A path that exists and is a regular file is forwarded unchanged.
/// - A path that exists and is a directory is walked recursively
///   (symlinks are not followed, matching `walkdir`'s default).
/// - A path that does not exist outright is treated as a glob pattern
///   (e.g. `corpus/*.PDQ`) and expanded with the `glob` crate; entries
///   that fail to read (permission errors, broken symlinks) are skipped.
///
/// Returns an empty `Vec` when `inputs` is empty or resolves to nothing.
pub fn expand_inputs(inputs: &[&str]) -> io::Result<Vec<PathBuf>> {
    let mut result = Vec::new();
    for input in inputs {
        let path = Path::new(input);
        if path.is_file() {
            result.push(path.to_path_buf());
        } else if path.is_dir() {
            for entry in WalkDir::new(path) {
                let entry = entry.map_err(|e| {
                    e.io_error()
                        .map(|io| io::Error::new(io.kind(), io.to_string()))
                        .unwrap_or_else(|| io::Error::other(e.to_string()))
                })?;
                if entry.file_type().is_file() {
                    result.push(entry.into_path());
                }
            }
        } else {
            for entry in glob::glob(input)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?
            {
                if let Ok(p) = entry {
                    if p.is_file() {
                        result.push(p);
                    }
                }
            }
        }
    }
    Ok(result)
}

/// Read a file's lines, trimming trailing newlines/whitespace and
/// dropping blank lines. Every non-blank line is treated as one hex
/// hash; validation against the index's acceptor happens in `Index::update`.
pub fn read_hash_lines(path: &Path) -> io::Result<Vec<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// The category label derived from a loaded file: its file stem (matches
/// spec §6's CLI surface, `Update(file_lines, file_path)`, using the path
/// as the category).
pub fn category_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn reads_non_blank_lines_and_trims_whitespace() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("sample.PDQ");
        let mut f = fs::File::create(&file_path).unwrap();
        writeln!(f, "  abc123  ").unwrap();
        writeln!(f).unwrap();
        writeln!(f, "def456").unwrap();
        let lines = read_hash_lines(&file_path).unwrap();
        assert_eq!(lines, vec!["abc123".to_string(), "def456".to_string()]);
    }

    #[test]
    fn category_for_uses_file_stem() {
        let path = Path::new("/tmp/corpus/ignorable.PDQ");
        assert_eq!(category_for(path), "ignorable");
    }

    #[test]
    fn expand_inputs_walks_directories_recursively() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("nested");
        fs::create_dir(&sub).unwrap();
        fs::write(dir.path().join("a.PDQ"), "x").unwrap();
        fs::write(sub.join("b.PDQ"), "y").unwrap();
        let dir_str = dir.path().to_string_lossy().into_owned();
        let found = expand_inputs(&[&dir_str]).unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn expand_inputs_resolves_glob_patterns() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.PDQ"), "x").unwrap();
        fs::write(dir.path().join("b.txt"), "y").unwrap();
        let pattern = format!("{}/*.PDQ", dir.path().to_string_lossy());
        let found = expand_inputs(&[&pattern]).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].file_name().unwrap(), "a.PDQ");
    }
}
