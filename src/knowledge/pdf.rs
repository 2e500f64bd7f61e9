use std::path::Path;

use crate::core::errors::ApiError;

/// Extract the text of a PDF, page by page in document order.
///
/// `pdf-extract` separates pages with form feeds; pages that yield no
/// extractable text contribute nothing and are not an error. A missing
/// or unreadable file is fatal to domain activation.
pub fn extract_pdf_text(path: &Path) -> Result<String, ApiError> {
    if !path.exists() {
        return Err(ApiError::SourceFileMissing(format!(
            "knowledge base PDF not found: {}",
            path.display()
        )));
    }

    let raw = pdf_extract::extract_text(path).map_err(|e| {
        ApiError::SourceFileMissing(format!(
            "failed to extract text from {}: {}",
            path.display(),
            e
        ))
    })?;

    let mut text = String::new();
    for page in raw.split('\x0c') {
        let trimmed = page.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(trimmed);
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_pdf_is_a_source_file_error() {
        let err = extract_pdf_text(Path::new("/nonexistent/handbook.pdf")).unwrap_err();
        assert!(matches!(err, ApiError::SourceFileMissing(_)));
    }
}
