use std::path::Path;

use crate::error::ExtractError;

/// An uploaded PDF held in memory, identified by its file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfDocument {
    name: String,
    bytes: Vec<u8>,
}

impl PdfDocument {
    /// Reads the whole file. This is the only place the pipeline can fail.
    pub fn open(path: &Path) -> Result<Self, ExtractError> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Ok(Self { name, bytes })
    }

    #[must_use]
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// File name without its last extension, used to name artifacts.
    #[must_use]
    pub fn stem(&self) -> &str {
        match self.name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PdfDocument;

    #[test]
    fn stem_drops_only_last_extension() {
        let document = PdfDocument::from_bytes("report.v2.pdf", Vec::new());
        assert_eq!(document.stem(), "report.v2");
    }

    #[test]
    fn stem_keeps_dotfiles_and_bare_names() {
        assert_eq!(PdfDocument::from_bytes(".pdf", Vec::new()).stem(), ".pdf");
        assert_eq!(PdfDocument::from_bytes("scan", Vec::new()).stem(), "scan");
    }

    #[test]
    fn open_missing_file_is_io_error() {
        let error = PdfDocument::open(std::path::Path::new("/nonexistent/missing.pdf"))
            .expect_err("missing file should fail");
        assert!(matches!(error, crate::ExtractError::Io(_)));
    }
}
