//! The query engine: dispatch between the MIH candidate path and the
//! linear scan, and the lazy result sequence returned to callers.

use std::collections::BTreeSet;

use crate::primitives::{extract_word, hamming};
use crate::record::{CategoryTable, HashRecord};

/// One qualifying record returned by a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    /// Lowercased hex hash of the matching record.
    pub hash: String,
    /// Exact Hamming distance to the query hash.
    pub distance: i64,
    /// Category labels associated with the record, in a stable order.
    pub categories: Vec<String>,
}

/// A lazy sequence of query results. Callers may stop iterating at any
/// point (`.take(n)`, breaking a `for` loop, `.next()` one at a time)
/// without the remaining candidates ever being materialized or scored,
/// per spec §9's "lazy result sequence" guidance.
pub struct QueryResults<'a> {
    query_bits: Vec<u8>,
    max_distance: i64,
    records: &'a [HashRecord],
    categories: &'a CategoryTable,
    candidates: CandidateSource,
}

/// How the next candidate record index is produced.
enum CandidateSource {
    /// Linear scan: every record index in order.
    Linear { next: usize },
    /// MIH path: a pre-computed, deduplicated candidate set.
    Mih {
        ids: std::vec::IntoIter<u32>,
    },
}

impl<'a> QueryResults<'a> {
    pub(crate) fn linear(
        query_bits: Vec<u8>,
        max_distance: i64,
        records: &'a [HashRecord],
        categories: &'a CategoryTable,
    ) -> Self {
        QueryResults {
            query_bits,
            max_distance,
            records,
            categories,
            candidates: CandidateSource::Linear { next: 0 },
        }
    }

    pub(crate) fn mih(
        query_bits: Vec<u8>,
        max_distance: i64,
        records: &'a [HashRecord],
        categories: &'a CategoryTable,
        candidate_ids: BTreeSet<u32>,
    ) -> Self {
        let ids: Vec<u32> = candidate_ids.into_iter().collect();
        QueryResults {
            query_bits,
            max_distance,
            records,
            categories,
            candidates: CandidateSource::Mih {
                ids: ids.into_iter(),
            },
        }
    }

    fn score(&self, record_id: usize) -> Option<QueryResult> {
        let record = &self.records[record_id];
        let distance = hamming(&self.query_bits, &record.bits, Some(self.max_distance))
            .expect("query and record bit lengths are enforced equal at construction");
        if distance < 0 {
            return None;
        }
        Some(QueryResult {
            hash: record.hash.clone(),
            distance,
            categories: self.categories.labels_for(&record.categories),
        })
    }
}

impl<'a> Iterator for QueryResults<'a> {
    type Item = QueryResult;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let candidate = match &mut self.candidates {
                CandidateSource::Linear { next } => {
                    if *next >= self.records.len() {
                        return None;
                    }
                    let id = *next;
                    *next += 1;
                    id
                }
                CandidateSource::Mih { ids } => ids.next()? as usize,
            };
            if let Some(result) = self.score(candidate) {
                return Some(result);
            }
        }
    }
}

/// Collect the union, over all slots, of candidate record ids whose word
/// at that slot matches the query's word at that slot. This is the MIH
/// path's candidate set (spec §4.4): any two hashes within Hamming
/// distance `T < W*S` must agree on at least one word by pigeonhole, so
/// every true match is guaranteed to appear in at least one slot's
/// bucket. Missing slot lookups contribute nothing; duplicates across
/// slots collapse via the `BTreeSet`.
pub(crate) fn mih_candidates(
    query_bits: &[u8],
    slot_index: &crate::slotindex::SlotIndex,
    w: u32,
) -> BTreeSet<u32> {
    let mut candidates = BTreeSet::new();
    for slot in 0..slot_index.slot_count() {
        let word = extract_word(query_bits, slot, w);
        candidates.extend(slot_index.candidates(slot, word).iter().copied());
    }
    candidates
}
