use crate::document::PdfDocument;
use crate::outcome::Extraction;
use crate::pdf_reader::pdf_extract_text;

/// Linear text of the whole document in the parser's reading order.
///
/// Any parser failure is reported as [`Extraction::Degraded`] instead of an
/// error, so the caller still gets an (empty) text.
pub fn extract_text(document: &PdfDocument) -> Extraction<String> {
    Extraction::from_result(pdf_extract_text(document.bytes()))
}

/// First `max_chars` characters of `text`, with `...` appended when cut.
#[must_use]
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{extract_text, preview};
    use crate::document::PdfDocument;

    #[test]
    fn corrupt_document_degrades_to_empty_text() {
        let document = PdfDocument::from_bytes("broken.pdf", b"%PDF-1.4\n%%EOF garbage".to_vec());
        let outcome = extract_text(&document);
        assert!(outcome.is_degraded());
        assert_eq!(outcome.into_value(), "");
    }

    #[test]
    fn preview_cuts_on_character_boundaries() {
        assert_eq!(preview("héllo wörld", 5), "héllo...");
        assert_eq!(preview("short", 5), "short");
        assert_eq!(preview("", 1000), "");
    }
}
