use std::io::Write;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;

use crate::document::PdfDocument;
use crate::error::ExtractError;
use crate::model::NormalizedTable;
use crate::pipeline::ExtractionArtifacts;
use crate::table_parse::pad_rows;

#[must_use]
pub fn table_file_name(stem: &str, index: usize) -> String {
    format!("{stem}_table_{index}.csv")
}

#[must_use]
pub fn text_file_name(stem: &str) -> String {
    format!("{stem}.txt")
}

/// Names of the files written for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifacts {
    pub text_file: PathBuf,
    pub table_files: Vec<PathBuf>,
}

fn write_table<W: Write>(
    writer: &mut csv::Writer<W>,
    table: &NormalizedTable,
) -> Result<(), ExtractError> {
    let width = table.width();
    let mut headers = table.headers.clone();
    headers.resize(width, String::new());
    writer.write_record(&headers)?;

    for row in pad_rows(&table.rows, width) {
        writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or_default()))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the header row and every data row; nulls become empty fields and
/// short rows are padded to the widest row.
pub fn write_table_csv(
    path: &Path,
    table: &NormalizedTable,
    delimiter: u8,
) -> Result<(), ExtractError> {
    let mut writer = WriterBuilder::new().delimiter(delimiter).from_path(path)?;
    write_table(&mut writer, table)
}

pub fn table_to_csv_string(table: &NormalizedTable, delimiter: u8) -> Result<String, ExtractError> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::<u8>::new());
    write_table(&mut writer, table)?;

    let bytes = writer
        .into_inner()
        .map_err(|error| ExtractError::Csv(error.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Writes `<stem>_table_<n>.csv` per table and `<stem>.txt` into `output_dir`.
pub fn write_artifacts(
    output_dir: &Path,
    document: &PdfDocument,
    artifacts: &ExtractionArtifacts,
    delimiter: u8,
) -> Result<WrittenArtifacts, ExtractError> {
    std::fs::create_dir_all(output_dir)?;

    let mut table_files = Vec::with_capacity(artifacts.tables.len());
    for (index, table) in artifacts.tables.iter().enumerate() {
        let path = output_dir.join(table_file_name(document.stem(), index));
        write_table_csv(&path, table, delimiter)?;
        table_files.push(path);
    }

    let text_file = output_dir.join(text_file_name(document.stem()));
    std::fs::write(&text_file, &artifacts.text)?;

    Ok(WrittenArtifacts {
        text_file,
        table_files,
    })
}
