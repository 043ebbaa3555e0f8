use tracing::debug;

use crate::document::PdfDocument;
use crate::model::{Cell, PageText, RawTable};
use crate::options::ExtractOptions;
use crate::outcome::Extraction;
use crate::pdf_reader::read_pdf_pages;
use crate::table_parse::{CellSpan, soft_split_line_into_spans, split_line_into_spans};

fn row_spans(line: &str, min_cols: usize) -> Option<Vec<CellSpan>> {
    let spans = split_line_into_spans(line);
    if spans.len() >= min_cols {
        return Some(spans);
    }

    let soft_spans = soft_split_line_into_spans(line);
    let has_numeric = soft_spans
        .iter()
        .any(|span| span.text.chars().any(|ch| ch.is_ascii_digit()));
    let looks_like_sentence = ['.', '!', '?']
        .iter()
        .any(|punctuation| line.trim_end().ends_with(*punctuation));
    if soft_spans.len() >= min_cols
        && !looks_like_sentence
        && (has_numeric || soft_spans.len() <= 6)
    {
        return Some(soft_spans);
    }

    None
}

fn nearest_anchor(anchors: &[usize], start: usize) -> usize {
    anchors
        .iter()
        .enumerate()
        .min_by_key(|(_, anchor)| anchor.abs_diff(start))
        .map_or(0, |(index, _)| index)
}

/// Lays every row out on the columns of the region's widest row.
///
/// Columns a row has no text for become `None`. A cell that collides with an
/// occupied column moves right to the next free one; when none is left it is
/// appended past the last column and the row comes out ragged.
fn align_region(rows: &[Vec<CellSpan>]) -> Vec<Vec<Cell>> {
    let widest = rows.iter().map(Vec::len).max().unwrap_or(0);
    let anchors = rows
        .iter()
        .find(|row| row.len() == widest)
        .map(|row| row.iter().map(|span| span.start).collect::<Vec<_>>())
        .unwrap_or_default();

    rows.iter()
        .map(|row| -> Vec<Cell> {
            if row.len() == anchors.len() {
                return row.iter().map(|span| Some(span.text.clone())).collect();
            }

            let mut cells: Vec<Cell> = vec![None; anchors.len()];
            let mut overflow = Vec::new();
            for span in row {
                let column = nearest_anchor(&anchors, span.start);
                match (column..anchors.len()).find(|&index| cells[index].is_none()) {
                    Some(free) => cells[free] = Some(span.text.clone()),
                    None => overflow.push(Some(span.text.clone())),
                }
            }
            cells.extend(overflow);
            cells
        })
        .collect()
}

fn region_to_table(page: u32, region: usize, rows: &[Vec<CellSpan>]) -> RawTable {
    let mut aligned = align_region(rows).into_iter();
    let headers = aligned
        .next()
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect();

    RawTable {
        page,
        region,
        headers,
        rows: aligned.collect(),
    }
}

fn detect_tables_in_page(page: &PageText, min_cols: usize) -> Vec<RawTable> {
    let mut tables = Vec::new();
    let mut current_rows: Vec<Vec<CellSpan>> = Vec::new();

    let flush_current = |rows: &mut Vec<Vec<CellSpan>>, tables: &mut Vec<RawTable>| {
        if rows.len() >= 2 {
            tables.push(region_to_table(page.page_number, tables.len(), rows));
        }
        rows.clear();
    };

    for line in page.text.lines() {
        match row_spans(line, min_cols) {
            Some(spans) => current_rows.push(spans),
            None => flush_current(&mut current_rows, &mut tables),
        }
    }

    flush_current(&mut current_rows, &mut tables);
    tables
}

pub(crate) fn detect_tables_in_pages(pages: &[PageText], min_cols: usize) -> Vec<RawTable> {
    let mut tables = Vec::new();
    for page in pages {
        let found = detect_tables_in_page(page, min_cols.max(2));
        debug!(page = page.page_number, tables = found.len(), "scanned page");
        tables.extend(found);
    }
    tables
}

/// Finds tabular regions, page by page and top to bottom.
///
/// Never fails: a document the reader cannot parse comes back as
/// [`Extraction::Degraded`].
pub fn detect_tables(
    document: &PdfDocument,
    options: &ExtractOptions,
) -> Extraction<Vec<RawTable>> {
    Extraction::from_result(
        read_pdf_pages(document, options.pages.as_ref())
            .map(|pages| detect_tables_in_pages(&pages, options.min_cols)),
    )
}
