use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    http::{header, HeaderValue},
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::export::{to_csv, EXPORT_FILE_NAME};
use crate::errors::AppError;
use crate::extraction::document::{decode_document, DocumentKind};
use crate::extraction::keywords::extract_keywords;
use crate::models::question::{QuestionRecord, RecommendationResult};
use crate::recommendation::recommender::{
    parse_question_count, pick_question_count, Recommender,
};
use crate::state::AppState;

/// Multipart field carrying the résumé.
pub const UPLOAD_FIELD: &str = "file";

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
const CSV_DISPOSITION: &str = "attachment; filename=\"interview_questions.csv\"";

#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    /// Overrides the randomly drawn question count. Kept as a string so bad
    /// values surface as an `ArgumentError` instead of a query rejection.
    pub count: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub count: usize,
    pub keyword_count: usize,
    pub ranked_count: usize,
    pub backfilled_count: usize,
    pub questions: Vec<QuestionRecord>,
}

#[derive(Debug, Serialize)]
pub struct CatalogSummary {
    pub total: usize,
    pub unique: usize,
    pub categories: BTreeMap<String, usize>,
}

struct Upload {
    file_name: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

struct Recommendation {
    keyword_count: usize,
    result: RecommendationResult,
}

/// POST /api/v1/recommendations
pub async fn handle_recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
    multipart: Multipart,
) -> Result<Json<RecommendationResponse>, AppError> {
    let rec = run_recommendation(&state, params, multipart).await?;
    Ok(Json(RecommendationResponse {
        count: rec.result.len(),
        keyword_count: rec.keyword_count,
        ranked_count: rec.result.ranked_count,
        backfilled_count: rec.result.backfilled_count,
        questions: rec.result.questions,
    }))
}

/// POST /api/v1/recommendations/csv
pub async fn handle_recommend_csv(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let rec = run_recommendation(&state, params, multipart).await?;
    let body = to_csv(&rec.result.questions)?;
    info!(file = EXPORT_FILE_NAME, rows = rec.result.len(), "CSV export built");
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(CSV_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, HeaderValue::from_static(CSV_DISPOSITION)),
        ],
        body,
    ))
}

/// GET /api/v1/questions/summary
pub async fn handle_catalog_summary(State(state): State<AppState>) -> Json<CatalogSummary> {
    Json(CatalogSummary {
        total: state.catalog.len(),
        unique: state.catalog.unique_len(),
        categories: state.catalog.category_counts(),
    })
}

/// Shared pipeline: count → upload → text → keywords → ranked result.
async fn run_recommendation(
    state: &AppState,
    params: RecommendParams,
    multipart: Multipart,
) -> Result<Recommendation, AppError> {
    // An unusable catalog outranks any request problem.
    if state.catalog.is_empty() {
        return Err(AppError::Config(
            "Cannot recommend from an empty question catalog".to_string(),
        ));
    }

    let count = match params.count.as_deref() {
        Some(raw) => parse_question_count(raw)?,
        None => pick_question_count(
            state.config.question_count_range(),
            &mut StdRng::from_entropy(),
        ),
    };

    let upload = read_upload(multipart).await?;
    let kind = DocumentKind::detect(upload.content_type.as_deref(), upload.file_name.as_deref())?;
    info!(
        file_name = upload.file_name.as_deref().unwrap_or("<unnamed>"),
        kind = ?kind,
        bytes = upload.data.len(),
        count,
        "Résumé received"
    );

    // PDF parsing is CPU-bound and may panic on hostile input.
    let keywords = tokio::task::spawn_blocking(move || {
        let text = decode_document(&upload.data, kind)?;
        Ok::<_, AppError>(extract_keywords(&text))
    })
    .await
    .map_err(|e| {
        if e.is_panic() {
            AppError::Input("Document could not be parsed".to_string())
        } else {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}"))
        }
    })??;

    let keyword_count = keywords.len();
    let catalog = Arc::clone(&state.catalog);
    let recommender = Recommender::new(Arc::clone(&state.scorer), state.config.max_backfill_rounds);
    let result = tokio::task::spawn_blocking(move || {
        let mut rng = StdRng::from_entropy();
        recommender.recommend(&keywords, &catalog, count, &mut rng)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in ranking: {e}")))??;

    info!(
        keyword_count,
        returned = result.len(),
        ranked = result.ranked_count,
        backfilled = result.backfilled_count,
        "Recommendation ready"
    );
    Ok(Recommendation {
        keyword_count,
        result,
    })
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Input(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Input(format!("Could not read uploaded file: {e}")))?;
        return Ok(Upload {
            file_name,
            content_type,
            data,
        });
    }
    Err(AppError::Input(format!(
        "Missing '{UPLOAD_FIELD}' field in multipart upload"
    )))
}
