//! Command-line argument parsing for the `phindex` binary.
//!
//! A single invocation loads a corpus, trains an index, and runs one or
//! more queries against it — there is no persisted index to open later
//! (spec §6: "Persisted state: None").

use anyhow::{anyhow, Result};
use clap::Parser;

/// In-memory Multi-Index Hashing similarity index over hex-encoded
/// fingerprints (e.g. PDQ perceptual hashes).
#[derive(Debug, Parser)]
#[command(name = crate::cli::constants::PROGRAM_NAME, author = crate::cli::constants::AUTHOR, version)]
pub struct Cli {
    /// Corpus inputs: files, directories (walked recursively), or glob
    /// patterns (e.g. `corpus/*.PDQ`). Each file's stem becomes the
    /// category label for every hash it contains. May be repeated.
    #[arg(long = "corpus", value_name = "PATH_OR_GLOB")]
    pub corpus: Vec<String>,

    /// Query to run, formatted `HEX_HASH:MAX_DISTANCE`. May be repeated to
    /// issue several queries against the same trained index.
    #[arg(long = "query", value_name = "HASH:MAX_DISTANCE")]
    pub query: Vec<String>,

    /// Use the named preset instead of --hash-size/--word-length/--match-threshold.
    #[arg(long = "preset", value_name = "NAME", default_value = "pdq")]
    pub preset: String,

    /// Hash size in bits (overrides --preset).
    #[arg(long = "hash-size", value_name = "H")]
    pub hash_size: Option<u32>,

    /// Word length in bits (overrides --preset).
    #[arg(long = "word-length", value_name = "W")]
    pub word_length: Option<u32>,

    /// Match threshold in bits (overrides --preset).
    #[arg(long = "match-threshold", value_name = "T")]
    pub match_threshold: Option<u32>,

    /// Notification level: 0 silent, 1 errors, 2 normal, 3 progress, 4 verbose.
    #[arg(short = 'v', long = "verbosity", value_name = "LEVEL", default_value_t = 2)]
    pub verbosity: u32,

    /// List the interned category labels after training and exit (no
    /// queries are run).
    #[arg(long = "list-categories")]
    pub list_categories: bool,
}

/// One parsed `HASH:MAX_DISTANCE` query request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub hash: String,
    pub max_distance: i64,
}

/// Parse a single `--query` value. Errors carry a human-readable message
/// naming the offending input and the expected form, matching this
/// crate's error-message convention.
pub fn parse_query(raw: &str) -> Result<QueryRequest> {
    let (hash, distance) = raw.rsplit_once(':').ok_or_else(|| {
        anyhow!("bad usage: query '{raw}' must be formatted HASH:MAX_DISTANCE (e.g. 'deadbeef...:8')")
    })?;
    let max_distance: i64 = distance.parse().map_err(|_| {
        anyhow!("bad usage: query '{raw}' has a non-numeric MAX_DISTANCE component '{distance}'")
    })?;
    if max_distance < 0 {
        return Err(anyhow!(
            "bad usage: query '{raw}' has a negative MAX_DISTANCE; it must be >= 0"
        ));
    }
    Ok(QueryRequest {
        hash: hash.to_string(),
        max_distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_query() {
        let q = parse_query("deadbeef:8").unwrap();
        assert_eq!(q.hash, "deadbeef");
        assert_eq!(q.max_distance, 8);
    }

    #[test]
    fn rejects_missing_colon() {
        assert!(parse_query("deadbeef").is_err());
    }

    #[test]
    fn rejects_non_numeric_distance() {
        assert!(parse_query("deadbeef:many").is_err());
    }

    #[test]
    fn rejects_negative_distance() {
        assert!(parse_query("deadbeef:-1").is_err());
    }
}
