//! Upload decoding — PDF via `pdf-extract`, plain text via strict UTF-8.
//!
//! PDF extraction is CPU-bound; callers run `decode_document` inside
//! `tokio::task::spawn_blocking`.

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Resolves the document kind from the declared media type, falling back
    /// to the file extension when the media type is absent or generic.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Result<Self, AppError> {
        let media_type = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase());

        match media_type.as_deref() {
            Some("application/pdf") => return Ok(DocumentKind::Pdf),
            Some("text/plain") => return Ok(DocumentKind::PlainText),
            Some("application/octet-stream") | Some("") | None => {}
            Some(other) => {
                return Err(AppError::Input(format!(
                    "Unsupported document type '{other}'; upload a PDF or plain-text file"
                )))
            }
        }

        let extension = file_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("pdf") => Ok(DocumentKind::Pdf),
            Some("txt") => Ok(DocumentKind::PlainText),
            _ => Err(AppError::Input(
                "Cannot determine document type; upload a .pdf or .txt file".to_string(),
            )),
        }
    }
}

/// Decodes upload bytes into document text.
pub fn decode_document(bytes: &[u8], kind: DocumentKind) -> Result<String, AppError> {
    if bytes.is_empty() {
        return Err(AppError::Input("Uploaded document is empty".to_string()));
    }
    match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::Input(format!("Could not extract text from PDF: {e}"))),
        DocumentKind::PlainText => String::from_utf8(bytes.to_vec())
            .map_err(|e| AppError::Input(format!("Document is not valid UTF-8 text: {e}"))),
    }
}
