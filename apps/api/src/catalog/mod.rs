// Question catalog: the fixed, read-only bank of interview questions.
// Loaded once in `main`, shared behind `Arc` for the process lifetime.

pub mod export;
pub mod loader;

use std::collections::{BTreeMap, HashSet};

use crate::models::question::QuestionRecord;

/// Ordered, immutable sequence of catalog questions.
#[derive(Debug, Clone, Default)]
pub struct QuestionCatalog {
    records: Vec<QuestionRecord>,
    unique_len: usize,
}

impl QuestionCatalog {
    pub fn new(records: Vec<QuestionRecord>) -> Self {
        let unique_len = records
            .iter()
            .map(|r| r.text.as_str())
            .collect::<HashSet<_>>()
            .len();
        Self {
            records,
            unique_len,
        }
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct question texts. Upper bound on any recommendation size.
    pub fn unique_len(&self) -> usize {
        self.unique_len
    }

    /// Question count per category, sorted by category name.
    pub fn category_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.category.clone()).or_insert(0) += 1;
        }
        counts
    }
}
