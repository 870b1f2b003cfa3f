//! Linear annealing of the exploration temperature.

use stigmaze_core::ConfigError;

/// Maps remaining simulation time to an exploration temperature.
///
/// `temperature = max(min, initial * time_remaining / horizon)`: linear
/// cooling from `initial` at the start of the run, clamped at `min` so
/// exploration never vanishes entirely.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TemperatureSchedule {
    initial: f64,
    min: f64,
    horizon: f64,
}

impl Default for TemperatureSchedule {
    fn default() -> Self {
        Self {
            initial: 1.0,
            min: 0.01,
            horizon: 20.0,
        }
    }
}

impl TemperatureSchedule {
    /// Build a schedule cooling from `initial` to `min` over `horizon`
    /// seconds.
    ///
    /// # Errors
    ///
    /// Requires `0 <= min <= initial` (all finite) and `horizon > 0`.
    pub fn new(initial: f64, min: f64, horizon: f64) -> Result<Self, ConfigError> {
        ConfigError::check_non_negative("initial_temperature", initial)?;
        ConfigError::check_non_negative("min_temperature", min)?;
        ConfigError::check_positive("simulation_time", horizon)?;
        if min > initial {
            return Err(ConfigError::InvalidTemperature {
                reason: format!("min_temperature ({min}) exceeds initial_temperature ({initial})"),
            });
        }
        Ok(Self {
            initial,
            min,
            horizon,
        })
    }

    /// Temperature at the start of the run.
    pub fn initial(&self) -> f64 {
        self.initial
    }

    /// Floor the temperature never drops below.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Total simulation time the schedule spans.
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// Temperature with `time_remaining` seconds left in the run.
    pub fn temperature_at(&self, time_remaining: f64) -> f64 {
        let t = self.initial * (time_remaining / self.horizon);
        if t.is_nan() {
            return self.min;
        }
        t.max(self.min)
    }
}
