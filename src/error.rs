use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PredictionError>;

/// Why a bedtime could not be predicted.
///
/// Every variant is recovered by the caller, which shows a placeholder instead
/// of a time.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("sleep model unavailable at {path}: {reason}")]
    ModelUnavailable { path: PathBuf, reason: String },

    #[error("invalid sleep model configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("sleep model evaluation failed: {message}")]
    Evaluation { message: String },

    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl PredictionError {
    #[must_use]
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn evaluation(message: impl Into<String>) -> Self {
        Self::Evaluation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn is_model_unavailable(&self) -> bool {
        matches!(self, Self::ModelUnavailable { .. })
    }

    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration { .. })
    }

    pub fn is_evaluation(&self) -> bool {
        matches!(self, Self::Evaluation { .. })
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

impl From<serde_json::Error> for PredictionError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_are_configuration_errors() {
        let err: PredictionError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.is_invalid_configuration());
        assert!(err.to_string().starts_with("invalid sleep model configuration"));
    }

    #[test]
    fn unavailable_message_names_the_path() {
        let err = PredictionError::ModelUnavailable {
            path: PathBuf::from("/missing/model.json"),
            reason: "not found".into(),
        };
        assert!(err.is_model_unavailable());
        assert_eq!(
            err.to_string(),
            "sleep model unavailable at /missing/model.json: not found"
        );
    }
}
