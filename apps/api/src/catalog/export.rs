use crate::catalog::loader::{CATEGORY_COLUMN, DIFFICULTY_COLUMN, QUESTION_COLUMN};
use crate::errors::AppError;
use crate::models::question::QuestionRecord;

/// File name offered for the CSV download.
pub const EXPORT_FILE_NAME: &str = "interview_questions.csv";

/// Serializes questions as CSV: `Question,Category,Difficulty`, one row per
/// record, in the given order.
pub fn to_csv(questions: &[QuestionRecord]) -> Result<String, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([QUESTION_COLUMN, CATEGORY_COLUMN, DIFFICULTY_COLUMN])
        .map_err(|e| AppError::Internal(e.into()))?;
    for q in questions {
        writer
            .write_record([q.text.as_str(), q.category.as_str(), q.difficulty.as_str()])
            .map_err(|e| AppError::Internal(e.into()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("CSV flush failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(e.into()))
}
