//! Text to word tokenization: split on whitespace, strip surrounding punctuation.

/// Split text into words, keeping their original case.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|s| s.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Split a search query into lower-cased words.
pub fn tokenize_query(query: &str) -> Vec<String> {
    tokenize(query).into_iter().map(|s| s.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_case_and_strips_punctuation() {
        assert_eq!(
            tokenize("Hello, world! (Rust)  -- ok"),
            vec!["Hello", "world", "Rust", "ok"]
        );
    }

    #[test]
    fn keeps_inner_punctuation() {
        assert_eq!(tokenize("don't stop e-mail"), vec!["don't", "stop", "e-mail"]);
    }

    #[test]
    fn query_is_lowercased() {
        assert_eq!(tokenize_query("Rust SEARCH"), vec!["rust", "search"]);
        assert!(tokenize_query("  ... ").is_empty());
    }
}
