//! End-to-end error-handling scenarios against the public library API.

use phindex::{Error, Index};

#[test]
fn update_after_train_is_a_state_violation() {
    let mut index = Index::from_preset_pdq();
    index
        .update(
            ["358c86641a5269ab5b0db5f1b2315c1642cef9652c39b6ced9f646d91f071927"],
            "a",
        )
        .unwrap();
    index.train();
    let err = index
        .update(
            ["358c86641a5269ab5b0db5f1b2315c1642cef9652c39b6ced9f646d91f071928"],
            "a",
        )
        .unwrap_err();
    assert!(matches!(err, Error::StateViolation { .. }));
    assert!(err.to_string().contains("invalid state"));
}

#[test]
fn query_before_train_is_a_state_violation() {
    let index = Index::from_preset_pdq();
    let err = index
        .query(
            "358c86641a5269ab5b0db5f1b2315c1642cef9652c39b6ced9f646d91f071927",
            0,
        )
        .unwrap_err();
    assert!(matches!(err, Error::StateViolation { .. }));
}

#[test]
fn malformed_constructor_parameters_are_input_invalid() {
    assert!(matches!(
        Index::new(254, 16, 32).unwrap_err(),
        Error::InputInvalid { .. }
    ));
    assert!(matches!(
        Index::new(256, 48, 32).unwrap_err(),
        Error::InputInvalid { .. }
    ));
    assert!(matches!(
        Index::new(256, 16, 33).unwrap_err(),
        Error::InputInvalid { .. }
    ));
    assert!(matches!(
        Index::new(256, 16, 300).unwrap_err(),
        Error::InputInvalid { .. }
    ));
}

#[test]
fn wrong_length_hash_is_rejected_on_update_and_query() {
    let mut index = Index::from_preset_pdq();
    let err = index.update(["deadbeef"], "a").unwrap_err();
    assert!(matches!(err, Error::InputInvalid { .. }));

    index.train();
    let err = index.query("deadbeef", 0).unwrap_err();
    assert!(matches!(err, Error::InputInvalid { .. }));
}

#[test]
fn partial_batch_failure_keeps_earlier_entries_staged() {
    let mut index = Index::from_preset_pdq();
    let valid = "358c86641a5269ab5b0db5f1b2315c1642cef9652c39b6ced9f646d91f071927";
    let err = index.update([valid, "zzzz"], "a").unwrap_err();
    assert!(matches!(err, Error::InputInvalid { .. }));
    assert_eq!(index.train(), 1);
}

#[test]
fn mismatched_length_hamming_inputs_are_input_invalid() {
    let a = phindex::from_hex("ff").unwrap();
    let b = phindex::from_hex("ffff").unwrap();
    assert!(matches!(
        phindex::get_hamming(&a, &b, None).unwrap_err(),
        Error::InputInvalid { .. }
    ));
}
