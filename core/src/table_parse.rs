use crate::model::Cell;

/// A cell's text and the character column it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CellSpan {
    pub start: usize,
    pub text: String,
}

fn push_span(spans: &mut Vec<CellSpan>, start: usize, current: &mut String) {
    let text = current.trim();
    if !text.is_empty() {
        spans.push(CellSpan {
            start,
            text: text.to_string(),
        });
    }
    current.clear();
}

/// Splits on tabs and on runs of two or more spaces.
pub(crate) fn split_line_into_spans(line: &str) -> Vec<CellSpan> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut start = 0_usize;
    let mut whitespace_run = 0_usize;

    for (column, ch) in line.chars().enumerate() {
        if ch == '\t' {
            push_span(&mut spans, start, &mut current);
            whitespace_run = 0;
            continue;
        }

        if ch.is_whitespace() {
            whitespace_run += 1;
            if whitespace_run >= 2 {
                push_span(&mut spans, start, &mut current);
                continue;
            }
            if !current.is_empty() {
                current.push(' ');
            }
            continue;
        }

        if current.is_empty() {
            start = column;
        }
        whitespace_run = 0;
        current.push(ch);
    }

    push_span(&mut spans, start, &mut current);
    spans
}

pub(crate) fn soft_split_line_into_spans(line: &str) -> Vec<CellSpan> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut start = 0_usize;

    for (column, ch) in line.chars().enumerate() {
        if ch.is_whitespace() {
            push_span(&mut spans, start, &mut current);
            continue;
        }
        if current.is_empty() {
            start = column;
        }
        current.push(ch);
    }

    push_span(&mut spans, start, &mut current);
    spans
}

pub(crate) fn split_line_into_cells(line: &str) -> Vec<String> {
    split_line_into_spans(line)
        .into_iter()
        .map(|span| span.text)
        .collect()
}

pub(crate) fn soft_split_line_into_cells(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

pub(crate) fn pad_rows(rows: &[Vec<Cell>], width: usize) -> Vec<Vec<Cell>> {
    rows.iter()
        .map(|row| {
            let mut out = row.clone();
            if out.len() < width {
                out.resize(width, None);
            }
            out
        })
        .collect()
}
