//! Similarity scoring — pluggable, trait-based backend that measures how close
//! each catalog question is to a keyword query.
//!
//! Default: `TfIdfScorer`. `AppState` holds an `Arc<dyn SimilarityScorer>`.

use crate::recommendation::tfidf::{cosine_similarity, TfIdfVectorizer};

/// Computes one similarity per document, in document order, each in 0.0 – 1.0.
pub trait SimilarityScorer: Send + Sync {
    fn score(&self, query: &str, documents: &[&str]) -> Vec<f64>;

    /// Backend name, reported in logs.
    fn name(&self) -> &'static str;
}

/// Fits TF-IDF on the documents, projects the query, and scores by cosine.
#[derive(Debug, Default, Clone, Copy)]
pub struct TfIdfScorer;

impl SimilarityScorer for TfIdfScorer {
    fn score(&self, query: &str, documents: &[&str]) -> Vec<f64> {
        let vectorizer = TfIdfVectorizer::fit(documents);
        let query_vector = vectorizer.transform(query);
        if query_vector.is_zero() {
            return vec![0.0; documents.len()];
        }
        documents
            .iter()
            .map(|doc| cosine_similarity(&query_vector, &vectorizer.transform(doc)))
            .collect()
    }

    fn name(&self) -> &'static str {
        "tfidf"
    }
}
