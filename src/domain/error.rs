//! Domain error types.

/// Top-level error type for gridtrader.
///
/// Loop-limit breaches inside the engine are deliberately not represented
/// here: the simulation keeps going and flags the affected dates on its
/// result instead.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("malformed {field} price {value:?}")]
    MalformedPrice { field: String, value: String },

    #[error("malformed date {value:?}, expected YYYY-MM-DD")]
    MalformedDate { value: String },

    #[error("price series is empty")]
    EmptySeries,

    #[error("missing required column {column}")]
    MissingColumn { column: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&GridError> for std::process::ExitCode {
    fn from(err: &GridError) -> Self {
        let code: u8 = match err {
            GridError::Io(_) => 1,
            GridError::ConfigParse { .. } | GridError::ConfigInvalid { .. } => 2,
            GridError::Data { .. } | GridError::MissingColumn { .. } => 3,
            GridError::MalformedPrice { .. } | GridError::MalformedDate { .. } => 4,
            GridError::EmptySeries => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_offending_value() {
        let err = GridError::MalformedPrice {
            field: "close".into(),
            value: "1,15x.00".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("close"));
        assert!(msg.contains("1,15x.00"));
    }

    #[test]
    fn empty_series_message() {
        assert_eq!(GridError::EmptySeries.to_string(), "price series is empty");
    }
}
