//! `phindex` binary's command-line front-end: argument parsing and the
//! verbosity-level display mechanism consumed by `main.rs`.

pub mod args;
pub mod constants;
