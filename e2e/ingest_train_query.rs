//! End-to-end scenarios from spec §8, exercised against the public API.

use phindex::Index;

const H1: &str = "358c86641a5269ab5b0db5f1b2315c1642cef9652c39b6ced9f646d91f071927";
const H2: &str = "358c86641a5269ab5b0db5f1b2315c1642cef9652c39b6ced9f646d91f071928";
const H3: &str = "358c86641a5269ab5b0db5f1b2315c1642cef9652c39b6ced9f646d91f071936";

#[test]
fn scenario_1_single_hash_exact_query() {
    let mut index = Index::from_preset_pdq();
    index.update([H1], "ignorable").unwrap();
    assert_eq!(index.train(), 1);
    let results: Vec<_> = index.query(H1, 0).unwrap().collect();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].distance, 0);
    assert_eq!(results[0].categories, vec!["ignorable".to_string()]);
}

#[test]
fn scenario_2_exact_query_among_near_neighbors() {
    let mut index = Index::from_preset_pdq();
    index.update([H1, H2, H3], "ignorable").unwrap();
    index.train();
    let results: Vec<_> = index.query(H1, 0).unwrap().collect();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].hash, H1);
}

#[test]
fn scenario_3_wide_query_finds_all_three() {
    let mut index = Index::from_preset_pdq();
    index.update([H1, H2, H3], "ignorable").unwrap();
    index.train();
    let results: Vec<_> = index.query(H1, 10).unwrap().collect();
    assert_eq!(results.len(), 3);
}

#[test]
fn scenario_4_linear_path_above_threshold_is_exhaustive() {
    let mut index = Index::from_preset_pdq();
    index.update([H1, H2, H3], "ignorable").unwrap();
    index.train();

    // An unrelated hash far from the corpus: the linear path (maxDistance
    // = T + 2 = 34) must still return every record whose true distance is
    // within bound, which we verify against brute-force Hamming here.
    let unrelated = "0".repeat(64);
    let bits_q = phindex::from_hex(&unrelated).unwrap();
    let results: Vec<_> = index.query(&unrelated, 34).unwrap().collect();
    for hash in [H1, H2, H3] {
        let bits = phindex::from_hex(hash).unwrap();
        let true_distance = phindex::get_hamming(&bits_q, &bits, None).unwrap();
        let present = results.iter().any(|r| r.hash == hash);
        assert_eq!(present, true_distance <= 34, "hash {hash} mismatch");
    }
}

#[test]
fn scenario_5_window_counts() {
    // "8b" as a 16-bit word.
    let word = 0x8bu32;
    assert_eq!(phindex::get_window(word, 1, 16).len(), 17);
    assert_eq!(phindex::get_window(word, 2, 16).len(), 137);
}

#[test]
fn scenario_6_lifecycle_violations() {
    let mut index = Index::from_preset_pdq();
    index.update([H1], "ignorable").unwrap();
    index.train();
    assert!(index.update([H2], "ignorable").is_err());

    let fresh = Index::from_preset_pdq();
    assert!(fresh.query(H1, 0).is_err());

    assert!(Index::new(254, 16, 32).is_err());
}

#[test]
fn mih_path_agrees_with_brute_force_at_the_threshold_boundary() {
    let mut index = Index::from_preset_pdq();
    let corpus: Vec<String> = (0..200u32)
        .map(|i| {
            let mut bytes = [0u8; 32];
            bytes[28..32].copy_from_slice(&i.to_be_bytes());
            hex::encode(bytes)
        })
        .collect();
    index.update(corpus.iter(), "synthetic").unwrap();
    index.train();

    let probe = corpus[0].clone();
    let probe_bits = phindex::from_hex(&probe).unwrap();

    let mih_hashes: std::collections::BTreeSet<String> = index
        .query(&probe, index.match_threshold() as i64)
        .unwrap()
        .map(|r| r.hash)
        .collect();

    let brute_force: std::collections::BTreeSet<String> = corpus
        .iter()
        .filter(|h| {
            let bits = phindex::from_hex(h).unwrap();
            phindex::get_hamming(&probe_bits, &bits, None).unwrap()
                <= index.match_threshold() as i64
        })
        .cloned()
        .collect();

    assert_eq!(mih_hashes, brute_force);
}
