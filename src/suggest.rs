//! Autocomplete: rank indexed terms that contain the typed prefix.

use std::collections::BTreeMap;

use crate::index::Document;

/// Maximum number of suggestions returned per request.
pub const MAX_SUGGESTIONS: usize = 8;

/// Weight applied when a term starts with the query rather than merely containing it.
pub const PREFIX_BOOST: u64 = 1000;

/// Rank completion terms for `query` over every token of every document.
///
/// Matching is ASCII case-insensitive and only keeps tokens strictly longer
/// than the query. Scores accumulate per exact-case term, so `Cat` and `cat`
/// are ranked separately. Equal scores are ordered by term.
pub fn suggestions(query: &str, documents: &[Document]) -> Vec<String> {
    if query.is_empty() {
        return Vec::new();
    }
    let lower_query = query.to_ascii_lowercase();

    let mut scores: BTreeMap<&str, u64> = BTreeMap::new();
    for doc in documents {
        for token in &doc.tokens {
            let lower_token = token.to_ascii_lowercase();
            if lower_token.len() <= lower_query.len() || !lower_token.contains(&lower_query) {
                continue;
            }
            let Some(&frequency) = doc.term_frequency.get(token) else {
                continue;
            };
            let boost = if lower_token.starts_with(&lower_query) {
                PREFIX_BOOST
            } else {
                1
            };
            *scores.entry(token.as_str()).or_insert(0) += u64::from(frequency) * boost;
        }
    }

    let mut ranked: Vec<(&str, u64)> = scores.into_iter().collect();
    // Stable sort keeps the map's lexicographic order among ties.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(term, _)| term.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn doc(tokens: &[&str], frequencies: &[(&str, u32)]) -> Document {
        Document {
            file_name: "doc.txt".to_string(),
            file_path: "/data/doc.txt".to_string(),
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
            term_frequency: frequencies
                .iter()
                .map(|(t, f)| (t.to_string(), *f))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn empty_query_yields_nothing() {
        let docs = vec![Document::new("a.txt", "anything at all")];
        assert!(suggestions("", &docs).is_empty());
    }

    #[test]
    fn exact_length_match_is_excluded() {
        let docs = vec![
            doc(&["category"], &[("category", 3)]),
            doc(&["cat"], &[("cat", 5)]),
        ];
        assert_eq!(suggestions("cat", &docs), vec!["category"]);
    }

    #[test]
    fn prefix_matches_outrank_infix_matches() {
        // "bobcat": 50 * 1 = 50, "catalog": 1 * 1000 = 1000
        let docs = vec![doc(&["bobcat", "catalog"], &[("bobcat", 50), ("catalog", 1)])];
        assert_eq!(suggestions("cat", &docs), vec!["catalog", "bobcat"]);
    }

    #[test]
    fn scores_accumulate_across_documents() {
        let docs = vec![
            doc(&["cattle"], &[("cattle", 1)]),
            doc(&["catnip"], &[("catnip", 2)]),
            doc(&["cattle"], &[("cattle", 2)]),
        ];
        // cattle: 1000 + 2000, catnip: 2000
        assert_eq!(suggestions("cat", &docs), vec!["cattle", "catnip"]);
    }

    #[test]
    fn case_variants_rank_independently() {
        let docs = vec![Document::new("a.txt", "Catalog catalog catalog")];
        // catalog: two occurrences, each 2 * 1000; Catalog: 1 * 1000
        assert_eq!(suggestions("CAT", &docs), vec!["catalog", "Catalog"]);
    }

    #[test]
    fn ties_are_ordered_by_term() {
        let docs = vec![doc(
            &["cats", "catch", "cater"],
            &[("cats", 1), ("catch", 1), ("cater", 1)],
        )];
        assert_eq!(suggestions("cat", &docs), vec!["catch", "cater", "cats"]);
    }

    #[test]
    fn tokens_missing_from_frequency_map_are_skipped() {
        let docs = vec![doc(&["catalog"], &[])];
        assert!(suggestions("cat", &docs).is_empty());
    }

    #[test]
    fn never_more_than_eight() {
        let text: Vec<String> = (0..30).map(|i| format!("prefix{i}")).collect();
        let docs = vec![Document::new("many.txt", &text.join(" "))];
        let result = suggestions("prefix", &docs);
        assert_eq!(result.len(), MAX_SUGGESTIONS);
    }
}
