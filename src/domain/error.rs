//! Domain error types.

/// Top-level error type for pairsim.
#[derive(Debug, thiserror::Error)]
pub enum PairsimError {
    #[error("trade data unavailable: {path}: {reason}")]
    DataUnavailable { path: String, reason: String },

    #[error("schema error: {reason}")]
    Schema { reason: String },

    #[error("malformed record at row {row}, column {column}: {reason}")]
    MalformedRecord {
        row: usize,
        column: String,
        reason: String,
    },

    #[error("no trades match {filter}")]
    EmptySelection { filter: String },

    #[error("invalid investment amount {value}: must be a positive number")]
    InvalidInvestment { value: f64 },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&PairsimError> for std::process::ExitCode {
    fn from(err: &PairsimError) -> Self {
        let code: u8 = match err {
            PairsimError::Io(_) => 1,
            PairsimError::ConfigParse { .. }
            | PairsimError::ConfigMissing { .. }
            | PairsimError::ConfigInvalid { .. } => 2,
            PairsimError::DataUnavailable { .. }
            | PairsimError::Schema { .. }
            | PairsimError::MalformedRecord { .. } => 3,
            PairsimError::EmptySelection { .. } => 5,
            PairsimError::InvalidInvestment { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_input() {
        let err = PairsimError::EmptySelection {
            filter: "pair 'A - B'".into(),
        };
        assert_eq!(err.to_string(), "no trades match pair 'A - B'");

        let err = PairsimError::MalformedRecord {
            row: 4,
            column: "Net Return".into(),
            reason: "not a number: 'abc'".into(),
        };
        assert!(err.to_string().contains("row 4"));
        assert!(err.to_string().contains("Net Return"));
    }

    #[test]
    fn exit_codes_group_by_category() {
        use std::process::ExitCode;

        let io: ExitCode = (&PairsimError::Io(std::io::Error::other("x"))).into();
        assert_eq!(io, ExitCode::from(1));

        let empty: ExitCode = (&PairsimError::EmptySelection {
            filter: "x".into(),
        })
            .into();
        assert_eq!(empty, ExitCode::from(5));

        let invalid: ExitCode = (&PairsimError::InvalidInvestment { value: -1.0 }).into();
        assert_eq!(invalid, ExitCode::from(6));
    }
}
