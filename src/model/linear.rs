//! Linear sleep model loaded from exported coefficients.
//!
//! Formula: `actual_sleep = intercept + wake*w_wake + estimated_sleep*w_est + coffee*w_coffee`

use serde::{Deserialize, Serialize};

use crate::error::{PredictionError, Result};
use crate::model::{SleepFeatures, SleepRegressor};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Unit of the model's raw output.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum OutputUnit {
    #[default]
    Hours,
    Seconds,
}

impl OutputUnit {
    fn to_hours(self, raw: f64) -> f64 {
        match self {
            OutputUnit::Hours => raw,
            OutputUnit::Seconds => raw / SECONDS_PER_HOUR,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Coefficients {
    pub wake: f64,
    pub estimated_sleep: f64,
    pub coffee: f64,
}

/// Inclusive range a feature was trained on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FeatureDomain {
    pub min: f64,
    pub max: f64,
}

impl FeatureDomain {
    fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Domains {
    pub wake: Option<FeatureDomain>,
    pub estimated_sleep: Option<FeatureDomain>,
    pub coffee: Option<FeatureDomain>,
}

/// On-disk model description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SleepModelConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub output_unit: OutputUnit,
    pub intercept: f64,
    pub coefficients: Coefficients,
    #[serde(default)]
    pub domain: Domains,
}

fn default_name() -> String {
    "SleepCalculator".into()
}

fn default_kind() -> String {
    "linear".into()
}

impl SleepModelConfig {
    /// Reject configurations that could never evaluate.
    pub fn validate(&self) -> Result<()> {
        if self.kind != "linear" {
            return Err(PredictionError::invalid_configuration(format!(
                "unsupported model kind '{}'",
                self.kind
            )));
        }

        let weights = [
            ("intercept", self.intercept),
            ("wake", self.coefficients.wake),
            ("estimatedSleep", self.coefficients.estimated_sleep),
            ("coffee", self.coefficients.coffee),
        ];
        for (name, value) in weights {
            if !value.is_finite() {
                return Err(PredictionError::invalid_configuration(format!(
                    "coefficient '{name}' is not finite"
                )));
            }
        }

        let domains = [
            ("wake", self.domain.wake),
            ("estimatedSleep", self.domain.estimated_sleep),
            ("coffee", self.domain.coffee),
        ];
        for (name, domain) in domains {
            if let Some(d) = domain {
                if !d.min.is_finite() || !d.max.is_finite() || d.min > d.max {
                    return Err(PredictionError::invalid_configuration(format!(
                        "domain for '{name}' is invalid ({}..={})",
                        d.min, d.max
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Linear regression over the three sleep features.
#[derive(Debug, Clone)]
pub struct LinearSleepModel {
    config: SleepModelConfig,
}

impl LinearSleepModel {
    pub fn new(config: SleepModelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: SleepModelConfig = serde_json::from_str(json)?;
        Self::new(config)
    }

    pub fn config(&self) -> &SleepModelConfig {
        &self.config
    }

    fn check_domain(name: &str, domain: Option<FeatureDomain>, value: f64) -> Result<()> {
        match domain {
            Some(d) if !d.contains(value) => Err(PredictionError::evaluation(format!(
                "feature '{name}' = {value} outside trained range {}..={}",
                d.min, d.max
            ))),
            _ => Ok(()),
        }
    }
}

impl SleepRegressor for LinearSleepModel {
    fn predict(&self, features: &SleepFeatures) -> Result<f64> {
        let domain = &self.config.domain;
        let wake = features.wake as f64;
        let coffee = features.coffee as f64;

        if !features.estimated_sleep.is_finite() {
            return Err(PredictionError::evaluation("feature 'estimatedSleep' is not finite"));
        }
        Self::check_domain("wake", domain.wake, wake)?;
        Self::check_domain("estimatedSleep", domain.estimated_sleep, features.estimated_sleep)?;
        Self::check_domain("coffee", domain.coffee, coffee)?;

        let c = &self.config.coefficients;
        let raw = self.config.intercept
            + c.wake * wake
            + c.estimated_sleep * features.estimated_sleep
            + c.coffee * coffee;

        let hours = self.config.output_unit.to_hours(raw);
        if !hours.is_finite() {
            return Err(PredictionError::evaluation("prediction is not finite"));
        }
        if hours < 0.0 {
            return Err(PredictionError::evaluation(format!(
                "predicted sleep {hours:.3}h is negative"
            )));
        }
        Ok(hours)
    }
}
