//! Configuration errors for the Stigmaze simulation.
//!
//! Every constructor that takes tunables validates them up front and
//! returns a [`ConfigError`] instead of clamping. Runtime operations never
//! fail: an invalid move is a `false`, not an error.

use std::error::Error;
use std::fmt;

/// Errors detected while validating construction-time parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Maze width or height is zero.
    EmptyMaze {
        /// Logical width requested.
        width: u32,
        /// Logical height requested.
        height: u32,
    },
    /// Maze dimensions overflow the `i32` coordinate space.
    MazeTooLarge {
        /// Logical width requested.
        width: u32,
        /// Logical height requested.
        height: u32,
    },
    /// A probability is outside `[0, 1]`.
    ProbabilityOutOfRange {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A rate that must lie in the open interval `(0, 1)` does not.
    RateOutOfRange {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A parameter is NaN or infinite.
    NonFinite {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A parameter that must be non-negative (or positive) is not.
    Negative {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The temperature schedule is inconsistent.
    InvalidTemperature {
        /// Which invariant was violated.
        reason: String,
    },
    /// `agent_count` is zero.
    NoAgents,
    /// `wall_change_interval` is zero.
    ZeroInterval,
    /// The simulated tick duration is not a positive finite number.
    InvalidDt {
        /// The rejected value.
        value: f64,
    },
    /// No open logical cell was available to place an agent or goal.
    NoOpenCell {
        /// Which placement failed.
        region: &'static str,
    },
    /// A movement policy could not be built.
    Policy {
        /// Description of the failure.
        reason: String,
    },
}

impl ConfigError {
    /// Check that `value` is finite and within `[0, 1]`.
    pub fn check_probability(name: &'static str, value: f64) -> Result<f64, Self> {
        if !value.is_finite() {
            return Err(Self::NonFinite { name, value });
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(Self::ProbabilityOutOfRange { name, value });
        }
        Ok(value)
    }

    /// Check that `value` is finite and strictly inside `(0, 1)`.
    pub fn check_open_rate(name: &'static str, value: f64) -> Result<f64, Self> {
        if !value.is_finite() {
            return Err(Self::NonFinite { name, value });
        }
        if value <= 0.0 || value >= 1.0 {
            return Err(Self::RateOutOfRange { name, value });
        }
        Ok(value)
    }

    /// Check that `value` is finite and `>= 0`.
    pub fn check_non_negative(name: &'static str, value: f64) -> Result<f64, Self> {
        if !value.is_finite() {
            return Err(Self::NonFinite { name, value });
        }
        if value < 0.0 {
            return Err(Self::Negative { name, value });
        }
        Ok(value)
    }

    /// Check that `value` is finite and `> 0`.
    pub fn check_positive(name: &'static str, value: f64) -> Result<f64, Self> {
        Self::check_non_negative(name, value)?;
        if value == 0.0 {
            return Err(Self::Negative { name, value });
        }
        Ok(value)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMaze { width, height } => {
                write!(f, "maze dimensions must be at least 1x1, got {width}x{height}")
            }
            Self::MazeTooLarge { width, height } => {
                write!(f, "maze dimensions {width}x{height} exceed the coordinate range")
            }
            Self::ProbabilityOutOfRange { name, value } => {
                write!(f, "{name} must be in [0, 1], got {value}")
            }
            Self::RateOutOfRange { name, value } => {
                write!(f, "{name} must be in (0, 1), got {value}")
            }
            Self::NonFinite { name, value } => write!(f, "{name} must be finite, got {value}"),
            Self::Negative { name, value } => {
                write!(f, "{name} is out of range, got {value}")
            }
            Self::InvalidTemperature { reason } => {
                write!(f, "invalid temperature schedule: {reason}")
            }
            Self::NoAgents => write!(f, "agent_count must be at least 1"),
            Self::ZeroInterval => write!(f, "wall_change_interval must be at least 1"),
            Self::InvalidDt { value } => {
                write!(f, "dt must be finite and positive, got {value}")
            }
            Self::NoOpenCell { region } => write!(f, "no open cell available for {region}"),
            Self::Policy { reason } => write!(f, "invalid movement policy: {reason}"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probability_bounds_are_inclusive() {
        assert_eq!(ConfigError::check_probability("p", 0.0), Ok(0.0));
        assert_eq!(ConfigError::check_probability("p", 1.0), Ok(1.0));
        assert!(matches!(
            ConfigError::check_probability("p", 1.5),
            Err(ConfigError::ProbabilityOutOfRange { name: "p", .. })
        ));
        assert!(matches!(
            ConfigError::check_probability("p", f64::NAN),
            Err(ConfigError::NonFinite { .. })
        ));
    }

    #[test]
    fn open_rate_excludes_endpoints() {
        assert!(ConfigError::check_open_rate("r", 0.0).is_err());
        assert!(ConfigError::check_open_rate("r", 1.0).is_err());
        assert_eq!(ConfigError::check_open_rate("r", 0.85), Ok(0.85));
    }

    #[test]
    fn positive_rejects_zero() {
        assert!(ConfigError::check_positive("dt", 0.0).is_err());
        assert!(ConfigError::check_non_negative("w", 0.0).is_ok());
        assert!(ConfigError::check_non_negative("w", -0.1).is_err());
    }

    #[test]
    fn display_names_the_parameter() {
        let e = ConfigError::ProbabilityOutOfRange {
            name: "change_probability",
            value: 2.0,
        };
        assert_eq!(e.to_string(), "change_probability must be in [0, 1], got 2");
    }
}
