//! In-memory document index with TF-IDF ranking.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::tokenize;

/// A single indexed file.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub file_name: String,
    pub file_path: String,
    /// Tokens in document order, original case.
    pub tokens: Vec<String>,
    /// Exact-case token -> occurrences in this document.
    pub term_frequency: HashMap<String, u32>,
}

impl Document {
    /// Tokenize `text` and build a document for `file_path`.
    pub fn new(file_path: &str, text: &str) -> Self {
        let file_name = Path::new(file_path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.to_string());
        let tokens = tokenize::tokenize(text);
        let mut term_frequency: HashMap<String, u32> = HashMap::new();
        for token in &tokens {
            *term_frequency.entry(token.clone()).or_insert(0) += 1;
        }
        Self {
            file_name,
            file_path: file_path.to_string(),
            tokens,
            term_frequency,
        }
    }
}

/// A ranked hit, borrowing the matched document.
#[derive(Debug, Clone, Copy)]
pub struct SearchResult<'a> {
    pub document: &'a Document,
    pub score: f64,
}

/// Document collection plus a case-insensitive term index.
///
/// Populated before serving starts and only read afterwards.
#[derive(Debug, Default)]
pub struct SearchEngine {
    documents: Vec<Document>,
    /// lower-cased term -> document position -> term count
    term_tf: HashMap<String, HashMap<usize, u32>>,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and index every path. Returns how many documents were added.
    pub fn index_documents<P: AsRef<Path>>(&mut self, paths: &[P]) -> usize {
        let mut indexed = 0;
        for path in paths {
            let path = path.as_ref();
            match fs::read(path) {
                Ok(bytes) => {
                    let text = String::from_utf8_lossy(&bytes);
                    self.add_document(&path.to_string_lossy(), &text);
                    indexed += 1;
                }
                Err(e) => warn!("skipping {}: {}", path.display(), e),
            }
        }
        indexed
    }

    /// Index in-memory text under `file_path`.
    pub fn add_document(&mut self, file_path: &str, text: &str) {
        let document = Document::new(file_path, text);
        let position = self.documents.len();
        for (term, &count) in &document.term_frequency {
            *self
                .term_tf
                .entry(term.to_lowercase())
                .or_default()
                .entry(position)
                .or_insert(0) += count;
        }
        debug!(
            "indexed {} ({} tokens)",
            document.file_path,
            document.tokens.len()
        );
        self.documents.push(document);
    }

    /// TF-IDF search. Returns at most `limit` hits, best first.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchResult<'_>> {
        let words = tokenize::tokenize_query(query);
        if words.is_empty() || self.documents.is_empty() {
            return Vec::new();
        }
        let n = self.documents.len() as f64;
        let mut doc_scores: HashMap<usize, f64> = HashMap::new();
        for word in &words {
            let doc_counts = match self.term_tf.get(word) {
                Some(m) => m,
                None => continue,
            };
            let df = doc_counts.len() as f64;
            let idf = ((n + 1.0) / (df + 1.0)).ln() + 1.0;
            for (&position, &tf) in doc_counts {
                *doc_scores.entry(position).or_insert(0.0) += (tf as f64) * idf;
            }
        }
        let mut results: Vec<SearchResult<'_>> = doc_scores
            .into_iter()
            .map(|(position, score)| SearchResult {
                document: &self.documents[position],
                score,
            })
            .collect();
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.document.file_path.cmp(&b.document.file_path))
        });
        results.truncate(limit);
        results
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }
}
