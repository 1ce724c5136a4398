//! Catalog loader — reads the question bank CSV once at startup.
//!
//! Requires the `Question`, `Category` and `Difficulty` columns (any order,
//! extra columns ignored). The dataset ships Latin-1 encoded, so bytes that are
//! not valid UTF-8 are decoded as Latin-1 instead of being rejected.

use std::borrow::Cow;
use std::path::Path;

use tracing::{info, warn};

use crate::catalog::QuestionCatalog;
use crate::errors::AppError;
use crate::models::question::QuestionRecord;

pub const QUESTION_COLUMN: &str = "Question";
pub const CATEGORY_COLUMN: &str = "Category";
pub const DIFFICULTY_COLUMN: &str = "Difficulty";

/// Reads and validates the catalog at `path`.
pub fn load_catalog(path: &Path) -> Result<QuestionCatalog, AppError> {
    let bytes = std::fs::read(path).map_err(|e| {
        AppError::Config(format!("Cannot read catalog '{}': {e}", path.display()))
    })?;
    let catalog = parse_catalog(&bytes)?;
    info!(
        path = %path.display(),
        questions = catalog.len(),
        unique = catalog.unique_len(),
        "Question catalog loaded"
    );
    Ok(catalog)
}

/// Parses catalog CSV bytes. Fails on missing columns, malformed rows, or an
/// empty result.
pub fn parse_catalog(bytes: &[u8]) -> Result<QuestionCatalog, AppError> {
    let text = decode_text(bytes);
    let text = text.trim_start_matches('\u{feff}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::Config(format!("Cannot read catalog header: {e}")))?
        .clone();
    let column = |name: &str| -> Result<usize, AppError> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| AppError::Config(format!("Catalog is missing the '{name}' column")))
    };
    let question_idx = column(QUESTION_COLUMN)?;
    let category_idx = column(CATEGORY_COLUMN)?;
    let difficulty_idx = column(DIFFICULTY_COLUMN)?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| AppError::Config(format!("Malformed catalog row {}: {e}", row + 1)))?;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();

        let text = field(question_idx);
        if text.is_empty() {
            warn!(row = row + 1, "Skipping catalog row with blank question");
            continue;
        }
        records.push(QuestionRecord::new(
            text,
            field(category_idx),
            field(difficulty_idx),
        ));
    }

    if records.is_empty() {
        return Err(AppError::Config("Catalog contains no questions".to_string()));
    }
    Ok(QuestionCatalog::new(records))
}

/// UTF-8 when valid, otherwise Latin-1 (every byte maps to U+0000–U+00FF).
fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| b as char).collect()),
    }
}
