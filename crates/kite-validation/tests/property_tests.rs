//! Property-based tests for kite-validation using proptest.
//!
//! Covers the C4 fingerprinting invariants: canonicalization is
//! idempotent, and fingerprinting the same case content twice always
//! produces the same tagged fingerprints.

use kite_core::Case;
use kite_validation::{canonicalize_case_name, fingerprint};
use proptest::prelude::*;

proptest! {
    /// Canonicalizing an already-canonical case name is a no-op: case
    /// folding, punctuation stripping, and whitespace collapsing are all
    /// individually idempotent.
    #[test]
    fn canonicalize_case_name_is_idempotent(name in "[A-Za-z0-9 .,!?]{0,60}") {
        let once = canonicalize_case_name(&name);
        let twice = canonicalize_case_name(&once);
        prop_assert_eq!(once, twice);
    }

    /// Fingerprinting is a pure function of the case's identifying
    /// fields: computing it twice from the same case always agrees.
    #[test]
    fn fingerprint_is_deterministic(
        case_number in "[A-Za-z0-9/-]{0,15}",
        case_name in "[A-Za-z0-9 ]{1,40}",
        court_level in 1u8..=5,
    ) {
        let mut case = Case::new(case_name, "Supreme Court", "UK");
        case.case_number = case_number;
        case.court_level = court_level;

        let first = fingerprint(&case);
        let second = fingerprint(&case);
        prop_assert_eq!(first, second);
    }

    /// Changing only the case number never changes the case-name
    /// fingerprint tag — each tag is a pure function of its own field.
    #[test]
    fn case_name_fingerprint_is_independent_of_case_number(
        case_name in "[A-Za-z0-9 ]{1,40}",
        case_number_a in "[A-Za-z0-9/-]{0,15}",
        case_number_b in "[A-Za-z0-9/-]{0,15}",
    ) {
        let mut case_a = Case::new(&case_name, "Supreme Court", "UK");
        case_a.case_number = case_number_a;
        let mut case_b = Case::new(&case_name, "Supreme Court", "UK");
        case_b.case_number = case_number_b;

        prop_assert_eq!(fingerprint(&case_a).case_name, fingerprint(&case_b).case_name);
    }
}
