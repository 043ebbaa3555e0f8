use crate::error::ExtractError;

/// Result of a best-effort extraction step.
///
/// `Degraded` means the step could not run at all; `Complete` with an empty
/// value means it ran and found nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction<T> {
    Complete(T),
    Degraded { reason: String },
}

impl<T> Extraction<T> {
    pub(crate) fn from_result(result: Result<T, ExtractError>) -> Self {
        match result {
            Ok(value) => Self::Complete(value),
            Err(error) => Self::Degraded {
                reason: error.to_string(),
            },
        }
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    #[must_use]
    pub fn degraded_reason(&self) -> Option<&str> {
        match self {
            Self::Complete(_) => None,
            Self::Degraded { reason } => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Extraction<U> {
        match self {
            Self::Complete(value) => Extraction::Complete(f(value)),
            Self::Degraded { reason } => Extraction::Degraded { reason },
        }
    }
}

impl<T: Default> Extraction<T> {
    /// The extracted value, or the empty value when degraded.
    pub fn into_value(self) -> T {
        match self {
            Self::Complete(value) => value,
            Self::Degraded { .. } => T::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Extraction;
    use crate::ExtractError;

    #[test]
    fn degraded_yields_empty_value() {
        let outcome: Extraction<Vec<u8>> =
            Extraction::from_result(Err(ExtractError::PdfExtract("bad xref".to_string())));
        assert!(outcome.is_degraded());
        assert_eq!(
            outcome.degraded_reason(),
            Some("failed to extract PDF text: bad xref")
        );
        assert!(outcome.into_value().is_empty());
    }

    #[test]
    fn complete_empty_is_not_degraded() {
        let outcome = Extraction::Complete(String::new());
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.map(|text| text.len()), Extraction::Complete(0));
    }
}
