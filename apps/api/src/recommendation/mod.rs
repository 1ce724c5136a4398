// Question recommendation: TF-IDF similarity ranking, dedup, bounded backfill.
// The similarity backend sits behind `SimilarityScorer`; the ranking and
// backfill procedure in `recommender` does not depend on which one is used.

pub mod handlers;
pub mod recommender;
pub mod scorer;
pub mod tfidf;
