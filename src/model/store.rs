use anyhow::Context;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{PredictionError, Result};
use crate::{log_debug, log_info};
use crate::model::LinearSleepModel;

const ENABLE_LOGS: bool = true;

const BUNDLED_MODEL: &str = include_str!("../../models/sleep_calculator.json");

/// Where the sleep model artifact comes from.
///
/// Loading is repeated for every request and nothing is cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModelSource {
    /// Coefficients compiled into the crate.
    #[default]
    Bundled,
    /// A model file on disk.
    File(PathBuf),
}

impl ModelSource {
    pub fn load(&self) -> Result<LinearSleepModel> {
        let model = match self {
            ModelSource::Bundled => {
                log_debug!("Loading bundled sleep model");
                LinearSleepModel::from_json(BUNDLED_MODEL)
            }
            ModelSource::File(path) => {
                log_debug!("Loading sleep model from {}", path.display());
                let contents = read_model_file(path).map_err(|err| {
                    PredictionError::ModelUnavailable {
                        path: path.clone(),
                        reason: format!("{err:#}"),
                    }
                })?;
                LinearSleepModel::from_json(&contents)
            }
        }?;
        log_info!("Loaded sleep model '{}'", model.config().name);
        Ok(model)
    }
}

fn read_model_file(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read sleep model from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SleepFeatures, SleepRegressor};
    use std::io::Write;

    #[test]
    fn bundled_model_loads_and_predicts() {
        let model = ModelSource::Bundled.load().unwrap();
        assert_eq!(model.config().name, "SleepCalculator");
        let hours = model
            .predict(&SleepFeatures {
                wake: 25_200,
                estimated_sleep: 8.0,
                coffee: 1,
            })
            .unwrap();
        assert!(hours > 4.0 && hours < 12.0);
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = ModelSource::File(path.clone()).load().unwrap_err();
        assert!(err.is_model_unavailable());
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn malformed_file_is_invalid_configuration() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not a model").unwrap();
        let err = ModelSource::File(file.path().to_path_buf()).load().unwrap_err();
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn file_model_is_used() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "intercept": 7.5,
                "coefficients": {{"wake": 0, "estimatedSleep": 0, "coffee": 0}}
            }}"#
        )
        .unwrap();
        let model = ModelSource::File(file.path().to_path_buf()).load().unwrap();
        let hours = model
            .predict(&SleepFeatures {
                wake: 0,
                estimated_sleep: 8.0,
                coffee: 1,
            })
            .unwrap();
        assert_eq!(hours, 7.5);
    }
}
