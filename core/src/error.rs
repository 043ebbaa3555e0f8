use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error")]
    Io(#[from] io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to load PDF: {0}")]
    PdfLoad(#[from] lopdf::Error),

    #[error("failed to extract PDF text: {0}")]
    PdfExtract(String),

    #[error("invalid page selection: {0}")]
    InvalidPageSelection(String),

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("no pages available after applying selection")]
    NoPagesSelected,
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::io;

    use super::ExtractError;

    #[test]
    fn io_error_leaves_the_cause_to_the_source_chain() {
        let error = ExtractError::from(io::Error::new(io::ErrorKind::NotFound, "report.pdf"));
        assert_eq!(error.to_string(), "I/O error");
        let source = error.source().expect("io error should keep its source");
        assert_eq!(source.to_string(), "report.pdf");
    }
}
