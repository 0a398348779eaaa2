use thiserror::Error;

/// Failures while reading the raw trip log.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid source URL: {0}")]
    InvalidUrl(String),
    #[error("HTTP {status} while fetching {url}")]
    HttpStatus { url: String, status: u16 },
    #[error("Input has no header row")]
    Empty,
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// A cell that could not be interpreted as the type its column requires.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Invalid timestamp in '{column}' at row {row}: {value:?}")]
    Timestamp {
        column: String,
        row: usize,
        value: String,
    },
    #[error("Invalid number in '{column}' at row {row}: {value:?}")]
    Number {
        column: String,
        row: usize,
        value: String,
    },
}

/// Aggregates that have nothing to aggregate over.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComputationError {
    #[error("No data available")]
    NoData,
}

/// Anything that stops the resident dataset from being built.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_missing_column() {
        let err = LoadError::MissingColumn("Fare Amount".into());
        assert_eq!(err.to_string(), "Missing required column: Fare Amount");
    }

    #[test]
    fn error_display_timestamp() {
        let err = ParseError::Timestamp {
            column: "Request Time".into(),
            row: 3,
            value: "yesterday".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid timestamp in 'Request Time' at row 3: \"yesterday\""
        );
    }

    #[test]
    fn error_display_no_data() {
        assert_eq!(ComputationError::NoData.to_string(), "No data available");
    }

    #[test]
    fn error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LoadError = io_err.into();
        assert!(err.to_string().contains("file not found"));
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn report_error_is_transparent() {
        let err: ReportError = LoadError::Empty.into();
        assert_eq!(err.to_string(), "Input has no header row");
        assert!(matches!(err, ReportError::Load(LoadError::Empty)));
    }
}
