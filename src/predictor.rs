//! Ideal bedtime prediction.
//!
//! The wake time is encoded as whole seconds since midnight, passed to the
//! sleep model together with the desired sleep and coffee intake, and the
//! predicted sleep is subtracted from the wake time on a 24 hour clock.

use chrono::{NaiveTime, Timelike};
use serde::Serialize;
use std::fmt;

use crate::error::{PredictionError, Result};
use crate::log_warn;
use crate::model::{SleepFeatures, SleepRegressor};

const ENABLE_LOGS: bool = true;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;
const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Longest sleep a model may predict: one year.
pub const MAX_PREDICTED_SLEEP_HOURS: f64 = 24.0 * 365.0;

pub const BEDTIME_PREFIX: &str = "Your ideal bedtime is\u{2026}";
pub const BEDTIME_FALLBACK: &str = "Your ideal bedtime is\u{2026} ?";

/// Time of day the user wants to wake up, at minute granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WakeTime {
    hour: u32,
    minute: u32,
}

impl Default for WakeTime {
    fn default() -> Self {
        Self { hour: 7, minute: 0 }
    }
}

impl WakeTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(PredictionError::invalid_input(format!(
                "wake time {hour:02}:{minute:02} is not a time of day"
            )));
        }
        Ok(Self { hour, minute })
    }

    /// Takes the hour and minute of any clock value; date and seconds are dropped.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
        }
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn seconds_since_midnight(&self) -> i64 {
        i64::from(self.hour) * 3600 + i64::from(self.minute) * 60
    }

    pub fn to_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or_default()
    }
}

impl fmt::Display for WakeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_naive_time().format("%I:%M %p"))
    }
}

/// Wake time minus predicted sleep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IdealBedtime {
    time: NaiveTime,
    predicted_sleep_hours: f64,
    days_before_wake: i64,
}

impl IdealBedtime {
    fn from_wake(wake_time: WakeTime, predicted_sleep_hours: f64) -> Self {
        let sleep_ms = (predicted_sleep_hours * MILLIS_PER_HOUR).round() as i64;
        let bedtime_ms = wake_time.seconds_since_midnight() * MILLIS_PER_SECOND - sleep_ms;

        let day_ms = SECONDS_PER_DAY * MILLIS_PER_SECOND;
        let days_before_wake = -bedtime_ms.div_euclid(day_ms);
        let within_day_ms = bedtime_ms.rem_euclid(day_ms);

        let secs = (within_day_ms / MILLIS_PER_SECOND) as u32;
        let nanos = ((within_day_ms % MILLIS_PER_SECOND) * 1_000_000) as u32;
        // within_day_ms is always inside a single day
        let time = NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
            .unwrap_or_default();

        Self {
            time,
            predicted_sleep_hours,
            days_before_wake,
        }
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn predicted_sleep_hours(&self) -> f64 {
        self.predicted_sleep_hours
    }

    /// Whole days between bedtime and the wake day; 1 means the night before.
    pub fn days_before_wake(&self) -> i64 {
        self.days_before_wake
    }

    pub fn is_previous_day(&self) -> bool {
        self.days_before_wake > 0
    }

    /// Twelve hour clock text, e.g. `10:30 PM`.
    pub fn formatted(&self) -> String {
        self.time.format("%I:%M %p").to_string()
    }
}

impl fmt::Display for IdealBedtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

/// Encode the form inputs the way the sleep model expects them.
pub fn encode_features(
    wake_time: WakeTime,
    sleep_amount_hours: f64,
    coffee_cups: u32,
) -> SleepFeatures {
    SleepFeatures {
        wake: wake_time.seconds_since_midnight(),
        estimated_sleep: sleep_amount_hours,
        coffee: i64::from(coffee_cups),
    }
}

/// Predict when to go to bed to wake at `wake_time`.
///
/// The sleep amount must be a positive number of hours; UI bounds are not
/// enforced here.
pub fn predict_bedtime<M: SleepRegressor + ?Sized>(
    model: &M,
    wake_time: WakeTime,
    sleep_amount_hours: f64,
    coffee_cups: u32,
) -> Result<IdealBedtime> {
    if !sleep_amount_hours.is_finite() || sleep_amount_hours <= 0.0 {
        return Err(PredictionError::invalid_input(format!(
            "sleep amount {sleep_amount_hours} must be a positive number of hours"
        )));
    }

    let features = encode_features(wake_time, sleep_amount_hours, coffee_cups);
    let predicted = model.predict(&features)?;
    if !predicted.is_finite() || predicted < 0.0 {
        return Err(PredictionError::evaluation(format!(
            "model returned unusable sleep duration {predicted}"
        )));
    }
    if predicted > MAX_PREDICTED_SLEEP_HOURS {
        return Err(PredictionError::evaluation(format!(
            "predicted sleep {predicted}h exceeds {MAX_PREDICTED_SLEEP_HOURS}h"
        )));
    }

    Ok(IdealBedtime::from_wake(wake_time, predicted))
}

/// Text shown under the form. Failures become a fixed placeholder.
pub fn bedtime_message(result: &Result<IdealBedtime>) -> String {
    match result {
        Ok(bedtime) => format!("{BEDTIME_PREFIX} {bedtime}"),
        Err(err) => {
            log_warn!("Ideal bedtime unavailable: {err}");
            BEDTIME_FALLBACK.to_string()
        }
    }
}
