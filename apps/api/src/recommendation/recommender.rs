//! Question recommender — ranks the catalog against a keyword set and builds a
//! text-unique result of the requested size.
//!
//! # Procedure
//! 1. Score every question against the keywords joined into one query.
//! 2. Stable sort by descending score (ties keep catalog order).
//! 3. Take the top `count`, dedup by `text` keeping the first occurrence.
//! 4. Backfill with random catalog draws (with replacement) until the result
//!    holds `min(count, unique_len)` questions.
//!
//! Backfill runs at most `max_backfill_rounds` rounds of `needed` draws each.
//! If that still leaves the result short, the remaining unseen questions are
//! appended in catalog order, so the size invariant holds without looping on
//! small catalogs.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, warn};

use crate::catalog::QuestionCatalog;
use crate::errors::AppError;
use crate::models::question::{QuestionRecord, RecommendationResult, ScoredQuestion};
use crate::recommendation::scorer::SimilarityScorer;

pub const DEFAULT_MAX_BACKFILL_ROUNDS: usize = 32;

#[derive(Clone)]
pub struct Recommender {
    scorer: Arc<dyn SimilarityScorer>,
    max_backfill_rounds: usize,
}

impl Recommender {
    pub fn new(scorer: Arc<dyn SimilarityScorer>, max_backfill_rounds: usize) -> Self {
        Self {
            scorer,
            max_backfill_rounds,
        }
    }

    /// Scores and sorts the whole catalog. Deterministic for fixed inputs.
    pub fn rank<'a>(
        &self,
        keywords: &[String],
        catalog: &'a QuestionCatalog,
    ) -> Vec<ScoredQuestion<'a>> {
        let query = keywords.join(" ");
        let documents: Vec<&str> = catalog.records().iter().map(|r| r.text.as_str()).collect();
        let scores = self.scorer.score(&query, &documents);

        let mut scored: Vec<ScoredQuestion<'a>> = catalog
            .records()
            .iter()
            .enumerate()
            .map(|(index, record)| ScoredQuestion {
                record,
                index,
                score: scores.get(index).copied().unwrap_or(0.0).clamp(0.0, 1.0),
            })
            .collect();

        // Equal scores keep catalog order.
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then(a.index.cmp(&b.index))
        });
        scored
    }

    /// Builds a recommendation of `count` unique questions (capped at the
    /// catalog's unique question count). `rng` drives backfill only.
    pub fn recommend<R: Rng + ?Sized>(
        &self,
        keywords: &[String],
        catalog: &QuestionCatalog,
        count: usize,
        rng: &mut R,
    ) -> Result<RecommendationResult, AppError> {
        if catalog.is_empty() {
            return Err(AppError::Config(
                "Cannot recommend from an empty question catalog".to_string(),
            ));
        }
        if count == 0 {
            return Err(AppError::Argument(
                "Requested question count must be a positive integer".to_string(),
            ));
        }

        let target = count.min(catalog.unique_len());
        let ranked = self.rank(keywords, catalog);

        let mut seen: HashSet<&str> = HashSet::with_capacity(target);
        let mut questions: Vec<QuestionRecord> = Vec::with_capacity(target);
        for scored in ranked.iter().take(count) {
            if seen.insert(scored.record.text.as_str()) {
                questions.push(scored.record.clone());
            }
        }
        let ranked_count = questions.len();

        let mut rounds = 0;
        while questions.len() < target && rounds < self.max_backfill_rounds {
            rounds += 1;
            let needed = target - questions.len();
            for _ in 0..needed {
                let record = &catalog.records()[rng.gen_range(0..catalog.len())];
                if seen.insert(record.text.as_str()) {
                    questions.push(record.clone());
                }
            }
        }

        if questions.len() < target {
            warn!(
                rounds,
                missing = target - questions.len(),
                "Random backfill exhausted its rounds; filling from catalog order"
            );
            for record in catalog.records() {
                if questions.len() >= target {
                    break;
                }
                if seen.insert(record.text.as_str()) {
                    questions.push(record.clone());
                }
            }
        }

        questions.truncate(count);
        let backfilled_count = questions.len() - ranked_count;

        debug!(
            scorer = self.scorer.name(),
            keywords = keywords.len(),
            requested = count,
            ranked_count,
            backfilled_count,
            rounds,
            "Recommendation built"
        );

        Ok(RecommendationResult {
            questions,
            ranked_count,
            backfilled_count,
        })
    }
}

/// Draws the per-request question count uniformly from `range`.
pub fn pick_question_count<R: Rng + ?Sized>(range: RangeInclusive<usize>, rng: &mut R) -> usize {
    rng.gen_range(range)
}

/// Validates a caller-supplied count. Zero, negative, and non-numeric values
/// are `ArgumentError`s.
pub fn parse_question_count(raw: &str) -> Result<usize, AppError> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::Argument(format!("Question count '{raw}' is not an integer")))?;
    if value <= 0 {
        return Err(AppError::Argument(format!(
            "Question count must be positive, got {value}"
        )));
    }
    usize::try_from(value)
        .map_err(|_| AppError::Argument(format!("Question count {value} is too large")))
}
