use serde::Serialize;

pub const DEFAULT_MARK_OPEN: &str = "<mark>";
pub const DEFAULT_MARK_CLOSE: &str = "</mark>";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    /// 1-based index of the line within the text split on `'\n'`.
    pub line_number: usize,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighter {
    pub open: String,
    pub close: String,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self {
            open: DEFAULT_MARK_OPEN.to_string(),
            close: DEFAULT_MARK_CLOSE.to_string(),
        }
    }
}

impl Highlighter {
    /// Selects lines case-insensitively, but only wraps occurrences spelled
    /// exactly like `query`. A line whose match differs in case is returned
    /// as-is. An empty query selects every line.
    #[must_use]
    pub fn search(&self, text: &str, query: &str) -> Vec<SearchMatch> {
        let needle = query.to_lowercase();
        let marked = format!("{}{query}{}", self.open, self.close);

        text.split('\n')
            .enumerate()
            .filter(|(_, line)| line.to_lowercase().contains(&needle))
            .map(|(index, line)| SearchMatch {
                line_number: index + 1,
                content: line.replace(query, &marked),
            })
            .collect()
    }
}

/// [`Highlighter::search`] with `<mark>` tags.
#[must_use]
pub fn search(text: &str, query: &str) -> Vec<SearchMatch> {
    Highlighter::default().search(text, query)
}
