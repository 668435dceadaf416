//! In-memory Multi-Index Hashing (MIH) similarity index for fixed-length
//! binary fingerprints, such as PDQ perceptual hashes.
//!
//! Given a corpus of hex-encoded hashes and a query hash plus a
//! Hamming-distance threshold, [`Index`] returns every indexed hash within
//! that threshold, together with the categories (arbitrary labels)
//! previously associated with it. Below the configured match threshold
//! `T`, retrieval is accelerated by partitioning each hash into `S`
//! equal-width words and building one inverted index per word position
//! (Norouzi et al.'s MIH technique); above `T` it falls back to a bounded
//! linear scan.
//!
//! The index is strictly two-phased: any number of [`Index::update`]
//! calls accumulate hash→category associations, a single
//! [`Index::train`] call freezes the index, and only then are
//! [`Index::query`] and friends valid.
//!
//! ```
//! use phindex::Index;
//!
//! let mut index = Index::from_preset_pdq();
//! index.update(["358c86641a5269ab5b0db5f1b2315c1642cef9652c39b6ced9f646d91f071927"], "sample")?;
//! index.train();
//! let results: Vec<_> = index
//!     .query("358c86641a5269ab5b0db5f1b2315c1642cef9652c39b6ced9f646d91f071927", 0)?
//!     .collect();
//! assert_eq!(results.len(), 1);
//! # Ok::<(), phindex::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod file;
pub mod index;
pub mod primitives;
pub mod query;
pub mod record;
pub mod slotindex;
pub mod staging;

pub use config::Config;
pub use error::{Error, Result};
pub use index::Index;
pub use query::{QueryResult, QueryResults};
pub use record::{CategoryTable, HashRecord};

/// Static primitive: encode packed bits as lowercased hex.
/// Equivalent to the programmatic surface's `ToHex`.
pub use primitives::to_hex;

/// Static primitive: decode a hex string into packed bytes.
/// Equivalent to the programmatic surface's `FromHex`.
pub use primitives::from_hex;

/// Static primitive: bounded Hamming distance between two equal-length
/// bit sequences. Equivalent to the programmatic surface's `GetHamming`.
pub use primitives::hamming as get_hamming;

/// Static primitive: all `w`-bit values within a given Hamming distance
/// of `word`. Equivalent to the programmatic surface's `GetWindow`.
pub use primitives::get_window;
