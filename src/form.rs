//! Non-visual model of the BetterRest screen.
//!
//! Holds the three inputs with their defaults and picker/stepper bounds, and
//! produces the text each section shows.

use serde::Serialize;
use std::ops::RangeInclusive;

use crate::error::Result;
use crate::log_debug;
use crate::model::{ModelSource, SleepRegressor};
use crate::predictor::{bedtime_message, predict_bedtime, IdealBedtime, WakeTime};

const ENABLE_LOGS: bool = false;

pub const WAKE_UP_TITLE: &str = "When do you want to wake up?";
pub const SLEEP_AMOUNT_TITLE: &str = "Desired amount of sleep";
pub const COFFEE_AMOUNT_TITLE: &str = "Daily coffee intake";

pub const SLEEP_MIN_HOURS: f64 = 4.0;
pub const SLEEP_MAX_HOURS: f64 = 12.0;
pub const SLEEP_STEP_HOURS: f64 = 0.25;
pub const COFFEE_CUPS: RangeInclusive<u32> = 1..=20;

const DEFAULT_SLEEP_HOURS: f64 = 8.0;
const DEFAULT_COFFEE_CUPS: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BedtimeForm {
    wake_up: WakeTime,
    sleep_amount: f64,
    coffee_amount: u32,
}

impl Default for BedtimeForm {
    fn default() -> Self {
        Self {
            wake_up: WakeTime::default(),
            sleep_amount: DEFAULT_SLEEP_HOURS,
            coffee_amount: DEFAULT_COFFEE_CUPS,
        }
    }
}

impl BedtimeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wake_up(&self) -> WakeTime {
        self.wake_up
    }

    pub fn sleep_amount(&self) -> f64 {
        self.sleep_amount
    }

    pub fn coffee_amount(&self) -> u32 {
        self.coffee_amount
    }

    pub fn set_wake_up(&mut self, wake_up: WakeTime) {
        self.wake_up = wake_up;
    }

    /// Clamp to the stepper range and snap to the nearest quarter hour.
    pub fn set_sleep_amount(&mut self, hours: f64) {
        if !hours.is_finite() {
            return;
        }
        let snapped = (hours / SLEEP_STEP_HOURS).round() * SLEEP_STEP_HOURS;
        self.sleep_amount = snapped.clamp(SLEEP_MIN_HOURS, SLEEP_MAX_HOURS);
    }

    pub fn increment_sleep(&mut self) {
        self.set_sleep_amount(self.sleep_amount + SLEEP_STEP_HOURS);
    }

    pub fn decrement_sleep(&mut self) {
        self.set_sleep_amount(self.sleep_amount - SLEEP_STEP_HOURS);
    }

    pub fn set_coffee_amount(&mut self, cups: u32) {
        self.coffee_amount = cups.clamp(*COFFEE_CUPS.start(), *COFFEE_CUPS.end());
    }

    /// Stepper text, e.g. `8 hours` or `8.25 hours`.
    pub fn sleep_label(&self) -> String {
        format!("{} hours", self.sleep_amount)
    }

    pub fn coffee_label(&self) -> String {
        coffee_label(self.coffee_amount)
    }

    /// Picker entries, one per allowed cup count.
    pub fn coffee_options() -> Vec<String> {
        COFFEE_CUPS.map(coffee_label).collect()
    }

    pub fn predict<M: SleepRegressor + ?Sized>(&self, model: &M) -> Result<IdealBedtime> {
        predict_bedtime(model, self.wake_up, self.sleep_amount, self.coffee_amount)
    }

    /// Load the model and render the bedtime line.
    ///
    /// Never fails: any error becomes the placeholder text.
    pub fn ideal_bedtime(&self, source: &ModelSource) -> String {
        log_debug!(
            "Predicting bedtime: wake={} sleep={} coffee={}",
            self.wake_up,
            self.sleep_amount,
            self.coffee_amount
        );
        let result = source.load().and_then(|model| self.predict(&model));
        bedtime_message(&result)
    }
}

fn coffee_label(cups: u32) -> String {
    if cups == 1 {
        "1 cup".to_string()
    } else {
        format!("{cups} cups")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::BEDTIME_FALLBACK;

    #[test]
    fn defaults_match_screen() {
        let form = BedtimeForm::new();
        assert_eq!(form.wake_up(), WakeTime::new(7, 0).unwrap());
        assert_eq!(form.sleep_amount(), 8.0);
        assert_eq!(form.coffee_amount(), 1);
        assert_eq!(form.sleep_label(), "8 hours");
        assert_eq!(form.coffee_label(), "1 cup");
    }

    #[test]
    fn sleep_stepper_clamps_and_snaps() {
        let mut form = BedtimeForm::new();
        form.increment_sleep();
        assert_eq!(form.sleep_amount(), 8.25);
        assert_eq!(form.sleep_label(), "8.25 hours");

        form.set_sleep_amount(3.0);
        assert_eq!(form.sleep_amount(), SLEEP_MIN_HOURS);
        form.decrement_sleep();
        assert_eq!(form.sleep_amount(), SLEEP_MIN_HOURS);

        form.set_sleep_amount(11.9);
        assert_eq!(form.sleep_amount(), 12.0);
        form.increment_sleep();
        assert_eq!(form.sleep_amount(), SLEEP_MAX_HOURS);

        form.set_sleep_amount(f64::NAN);
        assert_eq!(form.sleep_amount(), SLEEP_MAX_HOURS);
    }

    #[test]
    fn coffee_picker_clamps_and_inflects() {
        let mut form = BedtimeForm::new();
        form.set_coffee_amount(0);
        assert_eq!(form.coffee_amount(), 1);
        form.set_coffee_amount(25);
        assert_eq!(form.coffee_amount(), 20);
        assert_eq!(form.coffee_label(), "20 cups");

        let options = BedtimeForm::coffee_options();
        assert_eq!(options.len(), 20);
        assert_eq!(options[0], "1 cup");
        assert_eq!(options[1], "2 cups");
    }

    #[test]
    fn ideal_bedtime_with_bundled_model() {
        let text = BedtimeForm::new().ideal_bedtime(&ModelSource::Bundled);
        assert!(text.starts_with("Your ideal bedtime is\u{2026} "));
        assert_ne!(text, BEDTIME_FALLBACK);
        assert!(text.ends_with("PM") || text.ends_with("AM"));
    }

    #[test]
    fn ideal_bedtime_falls_back_when_model_missing() {
        let dir = tempfile::tempdir().unwrap();
        let source = ModelSource::File(dir.path().join("SleepCalculator.json"));
        assert_eq!(BedtimeForm::new().ideal_bedtime(&source), BEDTIME_FALLBACK);
    }

    #[test]
    fn ideal_bedtime_is_stable_across_calls() {
        let mut form = BedtimeForm::new();
        form.set_wake_up(WakeTime::new(5, 30).unwrap());
        form.set_coffee_amount(4);
        let first = form.ideal_bedtime(&ModelSource::Bundled);
        let second = form.ideal_bedtime(&ModelSource::Bundled);
        assert_eq!(first, second);
    }
}
