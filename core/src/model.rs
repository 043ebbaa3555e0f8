use serde::Serialize;

/// A single table cell. `None` marks a column the detector found no text for.
pub type Cell = Option<String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub page_number: u32,
    pub text: String,
}

/// One detected tabular region, exactly as the detector laid it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawTable {
    pub page: u32,
    /// Position of the region within its page, starting at 0.
    pub region: usize,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// A cleaned [`RawTable`]: no blank rows, trimmed lower-case headers.
///
/// Headers may repeat or be empty; rows may be ragged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedTable {
    pub page: u32,
    pub region: usize,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl NormalizedTable {
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest of the header row and every data row.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn is_ragged(&self) -> bool {
        let width = self.headers.len();
        self.rows.iter().any(|row| row.len() != width)
    }
}

impl From<NormalizedTable> for RawTable {
    fn from(table: NormalizedTable) -> Self {
        Self {
            page: table.page,
            region: table.region,
            headers: table.headers,
            rows: table.rows,
        }
    }
}
