//! Binary entry point for the `phindex` command-line tool.
//!
//! Loads a corpus (files/directories/globs, one category per file per
//! spec §6), trains an index, and runs the requested queries — all in a
//! single invocation, since the index has no persisted form. Diagnostics
//! and timing go to stderr behind the verbosity level; query results go
//! to stdout.

use std::time::Instant;

use anyhow::anyhow;
use phindex::cli::args::{parse_query, Cli};
use phindex::cli::constants::set_display_level;
use phindex::file::{category_for, expand_inputs, read_hash_lines};
use phindex::{Error, Index};
use phindex::{displayout, displaylevel};

use clap::Parser;

/// Process exit codes. Mirrors this crate's three-way error classification
/// (spec §7): I/O failures that never reach the index are distinct from
/// the index's own `input-invalid` / `state-violation` kinds.
const EXIT_OK: i32 = 0;
const EXIT_IO_ERROR: i32 = 1;
const EXIT_INPUT_INVALID: i32 = 2;
const EXIT_STATE_VIOLATION: i32 = 3;

fn build_index(cli: &Cli) -> anyhow::Result<Index> {
    match (cli.hash_size, cli.word_length, cli.match_threshold) {
        (Some(h), Some(w), Some(t)) => {
            Index::new(h, w, t).map_err(|e| anyhow!("bad usage: {e}"))
        }
        (None, None, None) => match cli.preset.as_str() {
            "pdq" => Ok(Index::from_preset_pdq()),
            other => Err(anyhow!(
                "bad usage: unknown preset '{other}' (known presets: pdq)"
            )),
        },
        _ => Err(anyhow!(
            "bad usage: --hash-size, --word-length, and --match-threshold must all be given together"
        )),
    }
}

fn run(cli: Cli) -> i32 {
    set_display_level(cli.verbosity);

    let mut index = match build_index(&cli) {
        Ok(index) => index,
        Err(message) => {
            displaylevel!(1, "{message}");
            return EXIT_INPUT_INVALID;
        }
    };

    let ingest_start = Instant::now();
    for pattern in &cli.corpus {
        let files = match expand_inputs(&[pattern.as_str()]) {
            Ok(files) => files,
            Err(e) => {
                displaylevel!(1, "failed to expand '{pattern}': {e}");
                return EXIT_IO_ERROR;
            }
        };
        for path in files {
            let lines = match read_hash_lines(&path) {
                Ok(lines) => lines,
                Err(e) => {
                    displaylevel!(1, "failed to read '{}': {e}", path.display());
                    return EXIT_IO_ERROR;
                }
            };
            let category = category_for(&path);
            displaylevel!(3, "ingesting {} hashes from '{}' as category '{category}'", lines.len(), path.display());
            if let Err(e) = index.update(lines, &category) {
                displaylevel!(1, "{e}");
                return match e {
                    Error::InputInvalid { .. } => EXIT_INPUT_INVALID,
                    Error::StateViolation { .. } => EXIT_STATE_VIOLATION,
                };
            }
        }
    }
    displaylevel!(3, "ingest finished in {:?}", ingest_start.elapsed());

    let train_start = Instant::now();
    let count = index.train();
    displaylevel!(
        2,
        "trained {count} record(s) in {:?}",
        train_start.elapsed()
    );

    if cli.list_categories {
        for label in index.list_categories(None) {
            displayout!("{label}");
        }
        return EXIT_OK;
    }

    for raw_query in &cli.query {
        let request = match parse_query(raw_query) {
            Ok(request) => request,
            Err(message) => {
                displaylevel!(1, "{message}");
                return EXIT_INPUT_INVALID;
            }
        };
        let query_start = Instant::now();
        let results = match index.query(&request.hash, request.max_distance) {
            Ok(results) => results,
            Err(e) => {
                displaylevel!(1, "{e}");
                return match e {
                    Error::InputInvalid { .. } => EXIT_INPUT_INVALID,
                    Error::StateViolation { .. } => EXIT_STATE_VIOLATION,
                };
            }
        };
        let mut matched = 0usize;
        for result in results {
            matched += 1;
            displayout!(
                "{}\t{}\t{}",
                result.hash,
                result.distance,
                result.categories.join(",")
            );
        }
        displaylevel!(
            2,
            "query '{}' (<= {}): {matched} match(es) in {:?}",
            request.hash,
            request.max_distance,
            query_start.elapsed()
        );
    }

    EXIT_OK
}

fn main() {
    let cli = Cli::parse();
    std::process::exit(run(cli));
}
