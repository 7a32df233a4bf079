pub mod error;
pub mod form;
pub mod model;
pub mod predictor;
pub mod utils;

pub use error::PredictionError;
pub use form::BedtimeForm;
pub use model::{LinearSleepModel, ModelSource, SleepFeatures, SleepRegressor};
pub use predictor::{bedtime_message, predict_bedtime, IdealBedtime, WakeTime};
pub use utils::init_logging;

/// Render the bedtime line for the current form values.
///
/// Entry point for an app shell: sets up logging once, then loads the model
/// from `source` and predicts.
pub fn run(form: &BedtimeForm, source: &ModelSource) -> String {
    init_logging();
    log::info!("BetterRest computing ideal bedtime...");
    form.ideal_bedtime(source)
}
