use lopdf::Document;
use tracing::debug;

use super::LoaderError;

/// Extracts the document text page by page, each page followed by a newline.
pub fn extract_text(pdf_bytes: &[u8]) -> Result<String, LoaderError> {
    let document =
        Document::load_mem(pdf_bytes).map_err(|err| LoaderError::InvalidPdf(err.to_string()))?;

    let pages = document.get_pages();
    let mut text = String::new();
    for page_number in pages.keys().copied() {
        let page_text =
            document
                .extract_text(&[page_number])
                .map_err(|err| LoaderError::PageExtraction {
                    page: page_number,
                    reason: err.to_string(),
                })?;
        text.push_str(&page_text);
        text.push('\n');
    }

    debug!(
        page_count = pages.len(),
        char_count = text.len(),
        "extracted pdf text"
    );
    Ok(text)
}
