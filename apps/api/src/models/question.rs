use serde::Serialize;

/// One catalog entry. Identity for deduplication is `text`, compared exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionRecord {
    #[serde(rename = "question")]
    pub text: String,
    pub category: String,
    pub difficulty: String,
}

impl QuestionRecord {
    pub fn new(
        text: impl Into<String>,
        category: impl Into<String>,
        difficulty: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            difficulty: difficulty.into(),
        }
    }
}

/// A catalog question paired with its similarity to the keyword query.
#[derive(Debug, Clone, Copy)]
pub struct ScoredQuestion<'a> {
    pub record: &'a QuestionRecord,
    /// Position in the catalog; ties in `score` keep this order.
    pub index: usize,
    /// Cosine similarity, 0.0 – 1.0.
    pub score: f64,
}

/// Ordered, text-unique recommendation list. Ranked picks come first,
/// random backfill picks after.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResult {
    pub questions: Vec<QuestionRecord>,
    pub ranked_count: usize,
    pub backfilled_count: usize,
}

impl RecommendationResult {
    pub fn len(&self) -> usize {
        self.questions.len()
    }
}
