mod document;
mod error;
mod model;
mod normalize;
mod options;
mod outcome;
mod output;
mod pdf_reader;
mod pipeline;
mod search;
mod table_detect;
mod table_parse;
mod text;
mod warning;

pub use document::PdfDocument;
pub use error::ExtractError;
pub use model::{Cell, NormalizedTable, RawTable};
pub use normalize::normalize;
pub use options::{ExtractOptions, PageSelection};
pub use outcome::Extraction;
pub use output::{
    WrittenArtifacts, table_file_name, table_to_csv_string, text_file_name, write_artifacts,
    write_table_csv,
};
pub use pipeline::{
    ExtractionArtifacts, ExtractionReport, detect_and_normalize_tables, run_pipeline,
    run_pipeline_path,
};
pub use search::{DEFAULT_MARK_CLOSE, DEFAULT_MARK_OPEN, Highlighter, SearchMatch, search};
pub use table_detect::detect_tables;
pub use text::{extract_text, preview};
pub use warning::{ExtractWarning, WarningCode as ExtractWarningCode};
