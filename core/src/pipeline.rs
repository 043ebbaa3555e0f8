use std::path::Path;

use tracing::{info, warn};

use crate::document::PdfDocument;
use crate::error::ExtractError;
use crate::model::NormalizedTable;
use crate::normalize::normalize;
use crate::options::ExtractOptions;
use crate::outcome::Extraction;
use crate::table_detect::detect_tables;
use crate::text::extract_text;
use crate::warning::{ExtractWarning, WarningCode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    pub table_count: usize,
    pub row_count: usize,
    pub warnings: Vec<ExtractWarning>,
}

/// Everything derived from one document, ready for a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionArtifacts {
    pub tables: Vec<NormalizedTable>,
    pub text: String,
    pub report: ExtractionReport,
}

impl ExtractionArtifacts {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.text.trim().is_empty()
    }
}

/// Detects every table region and normalizes each, keeping detection order.
pub fn detect_and_normalize_tables(
    document: &PdfDocument,
    options: &ExtractOptions,
) -> Extraction<Vec<NormalizedTable>> {
    detect_tables(document, options).map(|tables| tables.iter().map(normalize).collect())
}

fn table_warnings(tables: &[NormalizedTable], warnings: &mut Vec<ExtractWarning>) {
    for (index, table) in tables.iter().enumerate() {
        if table.is_ragged() {
            warn!(page = table.page, table = index, "table has ragged rows");
            warnings.push(
                ExtractWarning::new(
                    WarningCode::RaggedTable,
                    "rows differ in width from the header; output is padded",
                )
                .with_page(table.page)
                .with_table_index(index),
            );
        }
    }
}

/// Runs table detection and text extraction over one document.
///
/// Both halves always run; a failure in either one only adds a warning.
pub fn run_pipeline(
    document: &PdfDocument,
    options: &ExtractOptions,
) -> Result<ExtractionArtifacts, ExtractError> {
    options.validate()?;
    let mut warnings = Vec::new();

    let tables = match detect_and_normalize_tables(document, options) {
        Extraction::Complete(tables) => {
            if tables.is_empty() {
                warnings.push(ExtractWarning::new(
                    WarningCode::NoTablesDetected,
                    "no tables were detected in the selected pages",
                ));
            }
            tables
        }
        Extraction::Degraded { reason } => {
            warn!(document = document.name(), %reason, "table detection failed");
            warnings.push(ExtractWarning::new(
                WarningCode::TableDetectionDegraded,
                format!("table detection failed: {reason}"),
            ));
            Vec::new()
        }
    };
    table_warnings(&tables, &mut warnings);

    let text = match extract_text(document) {
        Extraction::Complete(text) => {
            if text.trim().is_empty() {
                warnings.push(ExtractWarning::new(
                    WarningCode::NoTextRecovered,
                    "document has no recoverable text",
                ));
            }
            text
        }
        Extraction::Degraded { reason } => {
            warn!(document = document.name(), %reason, "text extraction failed");
            warnings.push(ExtractWarning::new(
                WarningCode::TextExtractionDegraded,
                format!("text extraction failed: {reason}"),
            ));
            String::new()
        }
    };

    let row_count = tables.iter().map(NormalizedTable::row_count).sum();
    info!(
        document = document.name(),
        tables = tables.len(),
        rows = row_count,
        chars = text.chars().count(),
        "extraction finished"
    );

    Ok(ExtractionArtifacts {
        report: ExtractionReport {
            table_count: tables.len(),
            row_count,
            warnings,
        },
        tables,
        text,
    })
}

/// Same as [`run_pipeline`], reading the document from disk first. An
/// unreadable path is the one hard failure.
pub fn run_pipeline_path(
    path: &Path,
    options: &ExtractOptions,
) -> Result<(PdfDocument, ExtractionArtifacts), ExtractError> {
    let document = PdfDocument::open(path)?;
    let artifacts = run_pipeline(&document, options)?;
    Ok((document, artifacts))
}
