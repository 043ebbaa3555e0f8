use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    TableDetectionDegraded,
    TextExtractionDegraded,
    NoTablesDetected,
    NoTextRecovered,
    RaggedTable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractWarning {
    pub code: WarningCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_index: Option<usize>,
}

impl ExtractWarning {
    #[must_use]
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            page: None,
            table_index: None,
        }
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn with_table_index(mut self, table_index: usize) -> Self {
        self.table_index = Some(table_index);
        self
    }
}
