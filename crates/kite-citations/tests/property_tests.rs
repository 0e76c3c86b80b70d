//! Property-based tests for kite-citations using proptest.
//!
//! Covers the idempotence invariant pinned in the normalization spec:
//! `normalize(normalize(c)) == normalize(c)`.

use kite_citations::normalize;
use kite_core::{Citation, CitationFormat, CitationParts};
use proptest::prelude::*;
use uuid::Uuid;

fn format_strategy() -> impl Strategy<Value = CitationFormat> {
    prop_oneof![
        Just(CitationFormat::Bluebook),
        Just(CitationFormat::Neutral),
        Just(CitationFormat::Ecli),
        Just(CitationFormat::Canadian),
        Just(CitationFormat::Uk),
        Just(CitationFormat::Irish),
        Just(CitationFormat::Australian),
        Just(CitationFormat::Other),
    ]
}

fn opt_string(re: &'static str) -> impl Strategy<Value = Option<String>> {
    prop::option::of(re)
}

fn parts_strategy() -> impl Strategy<Value = CitationParts> {
    (
        opt_string("[0-9]{1,4}"),
        opt_string("[A-Za-z. ]{1,10}"),
        opt_string("[0-9]{1,4}"),
        opt_string("[0-9]{1,6}"),
        opt_string("[A-Za-z ]{1,15}"),
        opt_string("0{0,3}[0-9]{1,5}"),
        opt_string("[A-Za-z]{1,4}"),
    )
        .prop_map(|(volume, reporter, page, year, court, case_number, country)| CitationParts {
            volume,
            reporter,
            page,
            year,
            court,
            case_number,
            country,
        })
}

fn citation_strategy() -> impl Strategy<Value = Citation> {
    ("[A-Za-z0-9 .()]{0,40}", format_strategy(), parts_strategy(), 0.0f64..1.0).prop_map(
        |(raw, format, parts, confidence)| {
            Citation::new(raw, format, parts, Uuid::new_v4(), confidence)
        },
    )
}

proptest! {
    /// Normalizing an already-normalized citation must be a no-op: the
    /// abbreviation tables and render templates are all idempotent.
    #[test]
    fn normalize_is_idempotent(citation in citation_strategy()) {
        let once = normalize(&citation);
        let twice = normalize(&once);
        prop_assert_eq!(once.normalized, twice.normalized);
        prop_assert_eq!(once.parts, twice.parts);
    }

    /// Normalizing never changes the raw string or the originally
    /// recognized format — only `parts` and `normalized` are rewritten.
    #[test]
    fn normalize_preserves_raw_and_format(citation in citation_strategy()) {
        let normalized = normalize(&citation);
        prop_assert_eq!(&normalized.raw, &citation.raw);
        prop_assert_eq!(normalized.format, citation.format);
    }
}
