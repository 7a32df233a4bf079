pub mod linear;
pub mod store;

pub use linear::{
    Coefficients, Domains, FeatureDomain, LinearSleepModel, OutputUnit, SleepModelConfig,
};
pub use store::ModelSource;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Input features in the exact encoding the sleep model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepFeatures {
    /// Wake time as whole seconds since midnight.
    pub wake: i64,
    /// Desired sleep, hours.
    pub estimated_sleep: f64,
    /// Cups of coffee per day.
    pub coffee: i64,
}

/// A pre-trained regression that estimates actual sleep from the form inputs.
///
/// Implementations only run inference. They may reject inputs they were not
/// trained for.
pub trait SleepRegressor: Send + Sync + std::fmt::Debug {
    /// Predicted actual sleep, in hours.
    fn predict(&self, features: &SleepFeatures) -> Result<f64>;
}

impl<T: SleepRegressor + ?Sized> SleepRegressor for Box<T> {
    fn predict(&self, features: &SleepFeatures) -> Result<f64> {
        (**self).predict(features)
    }
}
