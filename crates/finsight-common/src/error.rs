use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinsightError {
    /// A line item the analysis depends on is absent from the statement.
    #[error("Required line item not found: '{0}'")]
    MissingLineItem(String),

    #[error("Expected at least 3 columns (item, prior period, current period), found {found}")]
    ColumnCount { found: usize },

    #[error("The statement contains no data rows")]
    EmptyStatement,

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FinsightError {
    /// Errors caused by the shape of the uploaded table rather than by I/O
    /// or the file container.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::MissingLineItem(_) | Self::ColumnCount { .. } | Self::EmptyStatement
        )
    }
}

pub type Result<T> = std::result::Result<T, FinsightError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_line_item_is_structural() {
        assert!(FinsightError::MissingLineItem("TOTAL ASSETS".into()).is_structural());
        assert!(FinsightError::ColumnCount { found: 2 }.is_structural());
        assert!(!FinsightError::Csv("bad quote".into()).is_structural());
    }

    #[test]
    fn test_missing_line_item_message_names_the_item() {
        let e = FinsightError::MissingLineItem("TOTAL ASSETS".into());
        assert!(e.to_string().contains("TOTAL ASSETS"));
    }
}
