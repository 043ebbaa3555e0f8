use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::ExtractError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    pages: BTreeSet<u32>,
}

impl PageSelection {
    #[must_use]
    pub fn contains(&self, page: u32) -> bool {
        self.pages.contains(&page)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl FromStr for PageSelection {
    type Err = ExtractError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let invalid = |message: String| ExtractError::InvalidPageSelection(message);
        let page_number = |raw: &str, what: &str| {
            raw.trim()
                .parse::<u32>()
                .map_err(|_| invalid(format!("invalid {what}: '{raw}'")))
                .and_then(|page| {
                    if page == 0 {
                        Err(invalid("pages are 1-based".to_string()))
                    } else {
                        Ok(page)
                    }
                })
        };

        let mut pages = BTreeSet::new();
        for token in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if let Some((start, end)) = token.split_once('-') {
                let start = page_number(start, "page range start")?;
                let end = page_number(end, "page range end")?;
                if end < start {
                    return Err(invalid(format!(
                        "invalid range '{token}': end is smaller than start"
                    )));
                }
                pages.extend(start..=end);
            } else {
                pages.insert(page_number(token, "page number")?);
            }
        }

        if pages.is_empty() {
            return Err(invalid("page selection cannot be empty".to_string()));
        }

        Ok(Self { pages })
    }
}

/// Knobs for a single extraction run. Text extraction ignores `pages` and
/// always covers the whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub pages: Option<PageSelection>,
    pub min_cols: usize,
    pub delimiter: u8,
}

impl ExtractOptions {
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.min_cols < 2 {
            return Err(ExtractError::InvalidOption(
                "min_cols must be at least 2".to_string(),
            ));
        }
        if !self.delimiter.is_ascii() {
            return Err(ExtractError::InvalidOption(
                "delimiter must be a single ASCII character".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            pages: None,
            min_cols: 2,
            delimiter: b',',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ExtractOptions, PageSelection};
    use crate::error::ExtractError;
    use std::str::FromStr;

    #[test]
    fn parse_page_selection_range_and_single() {
        let selection = PageSelection::from_str("1-3,5").expect("selection should parse");
        assert!(selection.contains(1));
        assert!(selection.contains(2));
        assert!(selection.contains(3));
        assert!(selection.contains(5));
        assert!(!selection.contains(4));
    }

    #[test]
    fn reject_invalid_page_selection() {
        let err = PageSelection::from_str("3-1").expect_err("invalid range should fail");
        assert!(matches!(err, ExtractError::InvalidPageSelection(_)));
        assert!(err.to_string().contains("invalid range"));
    }

    #[test]
    fn reject_zero_page() {
        let err = PageSelection::from_str("0,2").expect_err("zero page should fail");
        assert!(err.to_string().contains("1-based"));
    }

    #[test]
    fn reject_blank_and_non_numeric_selection() {
        assert!(matches!(
            PageSelection::from_str(" , "),
            Err(ExtractError::InvalidPageSelection(_))
        ));
        let err = PageSelection::from_str("2-x").expect_err("non-numeric end should fail");
        assert_eq!(err.to_string(), "invalid page selection: invalid page range end: 'x'");
    }

    #[test]
    fn rejects_single_column_threshold() {
        let options = ExtractOptions {
            min_cols: 1,
            ..ExtractOptions::default()
        };
        assert!(options.validate().is_err());
        assert!(ExtractOptions::default().validate().is_ok());
    }
}
