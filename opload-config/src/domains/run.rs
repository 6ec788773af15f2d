//! Load shape configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How many virtual users to run, how fast to start them and for how long
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of concurrent virtual users
    #[serde(default = "default_users")]
    pub users: usize,

    /// Users started per second
    #[serde(default = "default_spawn_rate")]
    pub spawn_rate: f64,

    /// Stop the run after this long; runs until interrupted when unset
    #[serde(
        with = "humantime_serde",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub run_time: Option<Duration>,

    /// Stop each user after this many tasks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u64>,

    /// Think-time between tasks
    #[serde(default)]
    pub wait_time: WaitTimeConfig,

    /// Interval of the periodic progress line
    #[serde(with = "humantime_serde", default = "default_report_interval")]
    pub report_interval: Duration,
}

/// Uniform think-time range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitTimeConfig {
    #[serde(with = "humantime_serde", default = "default_wait_min")]
    pub min: Duration,

    #[serde(with = "humantime_serde", default = "default_wait_max")]
    pub max: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            users: default_users(),
            spawn_rate: default_spawn_rate(),
            run_time: None,
            iterations: None,
            wait_time: WaitTimeConfig::default(),
            report_interval: default_report_interval(),
        }
    }
}

impl Default for WaitTimeConfig {
    fn default() -> Self {
        Self {
            min: default_wait_min(),
            max: default_wait_max(),
        }
    }
}

impl Validatable for RunConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(self.users, "users", self.domain_name())?;

        if !self.spawn_rate.is_finite() || self.spawn_rate <= 0.0 {
            return Err(self.validation_error(format!(
                "spawn_rate must be a positive number, got {}",
                self.spawn_rate
            )));
        }
        // The gap between user starts must fit in a Duration
        if Duration::try_from_secs_f64(1.0 / self.spawn_rate).is_err() {
            return Err(self.validation_error(format!(
                "spawn_rate {} is too small",
                self.spawn_rate
            )));
        }

        if let Some(run_time) = self.run_time {
            if run_time.is_zero() {
                return Err(self.validation_error("run_time must be greater than 0"));
            }
        }

        if let Some(iterations) = self.iterations {
            validate_positive(iterations, "iterations", self.domain_name())?;
        }

        if self.report_interval.is_zero() {
            return Err(self.validation_error("report_interval must be greater than 0"));
        }

        self.wait_time.validate()
    }

    fn domain_name(&self) -> &'static str {
        "run"
    }
}

impl Validatable for WaitTimeConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.min > self.max {
            return Err(self.validation_error(format!(
                "min ({:?}) must not exceed max ({:?})",
                self.min, self.max
            )));
        }
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "run.wait_time"
    }
}

// Default value functions
fn default_users() -> usize {
    1
}

fn default_spawn_rate() -> f64 {
    1.0
}

fn default_wait_min() -> Duration {
    Duration::from_secs(1)
}

fn default_wait_max() -> Duration {
    Duration::from_secs(3)
}

fn default_report_interval() -> Duration {
    Duration::from_secs(5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_config_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.users, 1);
        assert_eq!(config.spawn_rate, 1.0);
        assert!(config.run_time.is_none());
        assert_eq!(config.wait_time.min, Duration::from_secs(1));
        assert_eq!(config.wait_time.max, Duration::from_secs(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_run_config_validation() {
        let mut config = RunConfig::default();
        config.users = 0;
        assert!(config.validate().is_err());

        config = RunConfig::default();
        config.spawn_rate = 0.0;
        assert!(config.validate().is_err());

        config = RunConfig::default();
        config.spawn_rate = f64::NAN;
        assert!(config.validate().is_err());

        config = RunConfig::default();
        config.spawn_rate = 1e-20;
        assert!(config.validate().is_err());

        config = RunConfig::default();
        config.spawn_rate = 0.01;
        assert!(config.validate().is_ok());

        config = RunConfig::default();
        config.iterations = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_wait_time_is_rejected() {
        let mut config = RunConfig::default();
        config.wait_time = WaitTimeConfig {
            min: Duration::from_secs(5),
            max: Duration::from_secs(1),
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("run.wait_time"));
    }

    #[test]
    fn test_humantime_fields_from_yaml() {
        let yaml = r#"
users: 10
spawn_rate: 2.5
run_time: 1m 30s
wait_time:
  min: 500ms
  max: 2s
"#;
        let config: RunConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.users, 10);
        assert_eq!(config.run_time, Some(Duration::from_secs(90)));
        assert_eq!(config.wait_time.min, Duration::from_millis(500));
        assert_eq!(config.report_interval, Duration::from_secs(5));
    }
}
