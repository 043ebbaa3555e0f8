use crate::model::{Cell, NormalizedTable, RawTable};

fn is_blank(cell: &Cell) -> bool {
    cell.as_deref().is_none_or(str::is_empty)
}

/// Cleans one detected table: drops rows with no content and folds headers
/// to trimmed lower case. Data cells and row shapes are left untouched.
#[must_use]
pub fn normalize(table: &RawTable) -> NormalizedTable {
    let rows = table
        .rows
        .iter()
        .filter(|row| !row.iter().all(is_blank))
        .cloned()
        .collect();
    let headers = table
        .headers
        .iter()
        .map(|header| header.trim().to_lowercase())
        .collect();

    NormalizedTable {
        page: table.page,
        region: table.region,
        headers,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::normalize;
    use crate::model::{Cell, RawTable};

    fn cell(text: &str) -> Cell {
        Some(text.to_string())
    }

    fn raw(headers: &[&str], rows: Vec<Vec<Cell>>) -> RawTable {
        RawTable {
            page: 1,
            region: 0,
            headers: headers.iter().map(|header| (*header).to_string()).collect(),
            rows,
        }
    }

    #[test]
    fn drops_all_null_rows_and_keeps_partial_rows_verbatim() {
        let table = raw(
            &["A", "B"],
            vec![
                vec![None, None],
                vec![cell("x"), None],
                vec![cell(""), None],
                vec![cell("Mixed Case"), cell("2")],
            ],
        );
        let normalized = normalize(&table);
        assert_eq!(
            normalized.rows,
            vec![vec![cell("x"), None], vec![cell("Mixed Case"), cell("2")]]
        );
        assert!(
            normalized
                .rows
                .iter()
                .all(|row| row.iter().any(|value| value.as_deref().is_some_and(|v| !v.is_empty())))
        );
    }

    #[test]
    fn trims_and_lowercases_headers_keeping_duplicates() {
        let table = raw(&["  Name ", "NAME", "\tÄrger\n", ""], Vec::new());
        let normalized = normalize(&table);
        assert_eq!(normalized.headers, vec!["name", "name", "ärger", ""]);
        let expected = table
            .headers
            .iter()
            .map(|header| header.trim().to_lowercase())
            .collect::<Vec<_>>();
        assert_eq!(normalized.headers, expected);
    }

    #[test]
    fn all_empty_table_keeps_headers_and_no_rows() {
        let table = raw(&["Total", "Total"], vec![vec![None, None], vec![]]);
        let normalized = normalize(&table);
        assert!(normalized.rows.is_empty());
        assert_eq!(normalized.headers, vec!["total", "total"]);
    }

    #[test]
    fn ragged_rows_pass_through() {
        let table = raw(&["a"], vec![vec![cell("1"), cell("2"), cell("3")]]);
        let normalized = normalize(&table);
        assert!(normalized.is_ragged());
        assert_eq!(normalized.width(), 3);
    }

    #[test]
    fn normalizing_twice_changes_nothing() {
        let table = raw(
            &[" Qty ", "Price"],
            vec![vec![None, None], vec![cell("Pen"), None], vec![cell("3"), cell("1.5")]],
        );
        let once = normalize(&table);
        let twice = normalize(&RawTable::from(once.clone()));
        assert_eq!(once, twice);
    }
}
