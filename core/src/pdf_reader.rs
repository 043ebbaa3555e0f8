use std::collections::BTreeMap;
use std::panic::{AssertUnwindSafe, catch_unwind};

use encoding_rs::UTF_16BE;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId};

use crate::document::PdfDocument;
use crate::error::ExtractError;
use crate::model::PageText;
use crate::options::PageSelection;
use crate::table_parse::{soft_split_line_into_cells, split_line_into_cells};

/// Gap written between two cells that sit on the same baseline. Two spaces
/// is what the cell splitter treats as a column boundary.
const COLUMN_GAP: &str = "  ";

/// `TJ` adjustments are in thousandths of an em; anything wider than a space
/// glyph separates words, anything wider than two separates columns.
const WORD_KERN: f64 = 250.0;
const COLUMN_KERN: f64 = 1000.0;

/// Runs `pdf-extract` over the whole document, turning its panics on
/// malformed input into an ordinary error. Both the table detector and the
/// text extractor read through here.
pub(crate) fn pdf_extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    match catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(error)) => Err(ExtractError::PdfExtract(error.to_string())),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|message| (*message).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "parser panicked".to_string());
            Err(ExtractError::PdfExtract(message))
        }
    }
}

/// Per-page text from `pdf-extract`, when its form feeds line up with the
/// document's page count.
fn pdf_extract_pages(bytes: &[u8], page_count: usize) -> Option<Vec<String>> {
    let text = pdf_extract_text(bytes).ok()?;
    let mut pages = text.split('\u{000C}').map(str::to_string).collect::<Vec<_>>();
    if pages.len() == page_count + 1 && pages.last().is_some_and(String::is_empty) {
        pages.pop();
    }
    (pages.len() == page_count).then_some(pages)
}

fn is_garbled(text: &str) -> bool {
    text.contains("?Identity-H Unimplemented?") || text.contains('\u{FFFD}')
}

fn decode_utf16(bytes: &[u8]) -> Option<String> {
    let (text, had_errors) = UTF_16BE.decode_without_bom_handling(bytes);
    (!had_errors && !text.is_empty()).then(|| text.into_owned())
}

/// Decodes a text-showing string operand. BOM-prefixed strings and strings
/// set in two-byte fonts are read as UTF-16BE; everything else goes through
/// the font's simple encoding.
fn decode_string(encoding: Option<&str>, bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        if let Some(text) = decode_utf16(rest) {
            return text;
        }
    }

    let decoded = Document::decode_text(encoding, bytes);
    if !is_garbled(&decoded) {
        return decoded;
    }

    let two_byte = encoding.is_some_and(|name| {
        let lower = name.to_ascii_lowercase();
        lower.contains("identity") || lower.contains("ucs2") || lower.contains("utf16")
    });
    if two_byte {
        if let Some(text) = decode_utf16(bytes) {
            return text;
        }
    }

    String::from_utf8_lossy(bytes).into_owned()
}

fn number(object: &Object) -> Option<f64> {
    match object {
        #[allow(clippy::cast_precision_loss)]
        Object::Integer(value) => Some(*value as f64),
        Object::Real(value) => Some((*value).into()),
        _ => None,
    }
}

/// Builds baseline-ordered lines from a content stream. Moves that stay on
/// the current baseline become column gaps instead of line breaks, so cells
/// positioned one by one still come out as a single table row.
#[derive(Default)]
struct LineCollector {
    lines: Vec<String>,
    current: String,
}

impl LineCollector {
    fn push_text(&mut self, encoding: Option<&str>, operands: &[Object]) {
        for operand in operands {
            match operand {
                Object::String(bytes, _) => {
                    self.current.push_str(&decode_string(encoding, bytes));
                }
                Object::Array(items) => self.push_text(encoding, items),
                other => match number(other) {
                    Some(kern) if kern <= -COLUMN_KERN => self.gap(COLUMN_GAP),
                    Some(kern) if kern <= -WORD_KERN => self.gap(" "),
                    _ => {}
                },
            }
        }
    }

    fn gap(&mut self, gap: &str) {
        if !self.current.is_empty() && !self.current.ends_with(gap) {
            self.current.push_str(gap);
        }
    }

    fn break_line(&mut self) {
        let line = std::mem::take(&mut self.current);
        if !line.trim().is_empty() {
            self.lines.push(line.trim_end().to_string());
        }
    }

    fn move_to(&mut self, dy: f64) {
        if dy.abs() < f64::EPSILON {
            self.gap(COLUMN_GAP);
        } else {
            self.break_line();
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.break_line();
        self.lines
    }
}

fn collect_lines(operations: &[Operation], fonts: &BTreeMap<Vec<u8>, &str>) -> Vec<String> {
    let mut collector = LineCollector::default();
    let mut encoding = None;
    let mut baseline = None;

    for operation in operations {
        let operands = operation.operands.as_slice();
        match operation.operator.as_str() {
            "Tf" => {
                encoding = operands
                    .first()
                    .and_then(|name| name.as_name().ok())
                    .and_then(|name| fonts.get(name).copied());
            }
            "Tj" | "TJ" => collector.push_text(encoding, operands),
            "'" | "\"" => {
                collector.break_line();
                let shown = operands.last().map(std::slice::from_ref).unwrap_or_default();
                collector.push_text(encoding, shown);
            }
            "Td" | "TD" => {
                let dy = operands.get(1).and_then(number).unwrap_or(1.0);
                collector.move_to(dy);
            }
            "Tm" => {
                let y = operands.get(5).and_then(number);
                match (baseline, y) {
                    (Some(previous), Some(current)) => collector.move_to(current - previous),
                    _ => collector.break_line(),
                }
                baseline = y;
            }
            "T*" | "ET" => collector.break_line(),
            _ => {}
        }
    }

    collector.finish()
}

fn content_stream_text(document: &Document, page_id: ObjectId) -> Option<String> {
    let raw = document.get_page_content(page_id).ok()?;
    let content = Content::decode(&raw).ok()?;
    let fonts = document
        .get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (name, font.get_font_encoding()))
        .collect::<BTreeMap<Vec<u8>, &str>>();

    let lines = collect_lines(&content.operations, &fonts);
    (!lines.is_empty()).then(|| lines.join("\n"))
}

/// Higher for text whose lines split into cells; detection only sees the
/// best-scoring candidate of each page.
fn layout_score(text: &str) -> i64 {
    let mut score = 0_i64;
    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        score += 1;
        if split_line_into_cells(line).len() >= 2 || soft_split_line_into_cells(line).len() >= 3
        {
            score += 50;
        }
    }
    if is_garbled(text) {
        score -= 800;
    }
    score
}

/// Recovers one text block per page, keeping column spacing where the PDF
/// text layer allows it.
pub(crate) fn read_pdf_pages(
    source: &PdfDocument,
    page_selection: Option<&PageSelection>,
) -> Result<Vec<PageText>, ExtractError> {
    let document = Document::load_mem(source.bytes())?;
    let page_map = document.get_pages();
    let split_pages = pdf_extract_pages(source.bytes(), page_map.len());

    let pages = page_map
        .iter()
        .enumerate()
        .filter(|(_, (page_no, _))| {
            page_selection.is_none_or(|selection| selection.contains(**page_no))
        })
        .map(|(index, (page_no, page_id))| {
            let candidates = [
                split_pages.as_ref().and_then(|pages| pages.get(index).cloned()),
                content_stream_text(&document, *page_id),
                document.extract_text(&[*page_no]).ok(),
            ];
            let text = candidates
                .into_iter()
                .flatten()
                .filter(|text| !text.trim().is_empty())
                .max_by_key(|text| layout_score(text))
                .unwrap_or_default();
            PageText {
                page_number: *page_no,
                text,
            }
        })
        .collect::<Vec<_>>();

    if pages.is_empty() {
        return Err(ExtractError::NoPagesSelected);
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use lopdf::Object;
    use lopdf::content::Operation;

    use crate::pdf_reader::{collect_lines, decode_string, layout_score, pdf_extract_text};
    use crate::table_parse::split_line_into_cells;

    fn show(text: &str) -> Operation {
        Operation::new("Tj", vec![Object::string_literal(text)])
    }

    #[test]
    fn decodes_utf16_strings_with_bom() {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in "Umsatz €".encode_utf16() {
            bytes.extend(unit.to_be_bytes());
        }
        assert_eq!(decode_string(None, &bytes), "Umsatz €");
    }

    #[test]
    fn same_baseline_moves_become_column_gaps() {
        let operations = vec![
            Operation::new("BT", vec![]),
            show("Region"),
            Operation::new("Td", vec![120.into(), 0.into()]),
            show("Revenue"),
            Operation::new("Td", vec![(-120).into(), (-14).into()]),
            show("North"),
            Operation::new("Td", vec![120.into(), 0.into()]),
            show("4,210"),
            Operation::new("ET", vec![]),
        ];
        let lines = collect_lines(&operations, &BTreeMap::new());
        assert_eq!(lines, vec!["Region  Revenue", "North  4,210"]);
        assert_eq!(split_line_into_cells(&lines[1]), vec!["North", "4,210"]);
    }

    #[test]
    fn wide_tj_kerning_separates_columns() {
        let operations = vec![Operation::new(
            "TJ",
            vec![Object::Array(vec![
                Object::string_literal("Q1"),
                (-300).into(),
                Object::string_literal("total"),
                (-2400).into(),
                Object::string_literal("812"),
            ])],
        )];
        let lines = collect_lines(&operations, &BTreeMap::new());
        assert_eq!(lines, vec!["Q1 total  812"]);
    }

    #[test]
    fn absolute_positioning_breaks_lines_when_baseline_changes() {
        let matrix = |y: i64| {
            let operands = vec![1.into(), 0.into(), 0.into(), 1.into(), 40.into(), y.into()];
            Operation::new("Tm", operands)
        };
        let operations = vec![
            matrix(700),
            show("Item"),
            matrix(700),
            show("Qty"),
            matrix(686),
            show("Pen"),
        ];
        let lines = collect_lines(&operations, &BTreeMap::new());
        assert_eq!(lines, vec!["Item  Qty", "Pen"]);
    }

    #[test]
    fn column_layout_outscores_running_prose() {
        let prose = "Revenue grew in every region this quarter.";
        let table = "Region  Revenue\nNorth  4,210\nSouth  3,980";
        assert!(layout_score(table) > layout_score(prose));
    }

    #[test]
    fn garbage_bytes_are_an_error_not_a_panic() {
        assert!(pdf_extract_text(b"definitely not a pdf").is_err());
    }
}
