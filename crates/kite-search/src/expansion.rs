//! Query expansion (§4.5): a fixed synonyms table, expanded without
//! deduplication so repeated terms are weighted by repetition downstream.

const SYNONYMS: &[(&str, &str)] = &[
    ("negligence", "carelessness"),
    ("contract", "agreement"),
    ("damages", "compensation"),
    ("plaintiff", "claimant"),
    ("defendant", "respondent"),
    ("appeal", "review"),
    ("judgment", "ruling"),
    ("statute", "legislation"),
    ("tort", "civil wrong"),
    ("liability", "responsibility"),
    ("breach", "violation"),
    ("injunction", "restraining order"),
    ("verdict", "decision"),
    ("precedent", "authority"),
];

/// Returns the original tokens of `q` plus any synonyms, in order,
/// without deduplication.
#[must_use]
pub fn expand(q: &str) -> Vec<String> {
    let mut expanded = Vec::new();
    for token in q.split_whitespace() {
        expanded.push(token.to_string());
        let lower = token.to_lowercase();
        for (term, synonym) in SYNONYMS {
            if lower == *term {
                expanded.push((*synonym).to_string());
            }
        }
    }
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expansion_keeps_original_tokens_first() {
        let expanded = expand("negligence claim");
        assert_eq!(expanded[0], "negligence");
        assert_eq!(expanded[1], "carelessness");
        assert_eq!(expanded[2], "claim");
    }

    #[test]
    fn terms_without_synonyms_pass_through_unchanged() {
        let expanded = expand("xyz");
        assert_eq!(expanded, vec!["xyz".to_string()]);
    }

    #[test]
    fn synonyms_table_has_fourteen_entries() {
        assert_eq!(SYNONYMS.len(), 14);
    }
}
