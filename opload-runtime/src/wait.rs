//! Think-time between tasks

use opload_config::WaitTimeConfig;
use rand::Rng;
use std::time::Duration;

/// Uniform pause drawn from `[min, max]` after every task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitTime {
    min: Duration,
    max: Duration,
}

impl WaitTime {
    /// Inverted bounds are swapped
    pub fn between(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn constant(pause: Duration) -> Self {
        Self::between(pause, pause)
    }

    pub fn none() -> Self {
        Self::constant(Duration::ZERO)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }
}

impl Default for WaitTime {
    fn default() -> Self {
        WaitTimeConfig::default().into()
    }
}

impl From<WaitTimeConfig> for WaitTime {
    fn from(config: WaitTimeConfig) -> Self {
        Self::between(config.min, config.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_samples_stay_in_range() {
        let wait = WaitTime::between(Duration::from_secs(1), Duration::from_secs(3));
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..1_000 {
            let pause = wait.sample(&mut rng);
            assert!(pause >= Duration::from_secs(1) && pause <= Duration::from_secs(3));
        }
    }

    #[test]
    fn test_constant_and_none() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(WaitTime::constant(Duration::from_millis(250)).sample(&mut rng), Duration::from_millis(250));
        assert_eq!(WaitTime::none().sample(&mut rng), Duration::ZERO);
    }

    #[test]
    fn test_inverted_bounds_are_swapped() {
        let wait = WaitTime::between(Duration::from_secs(5), Duration::from_secs(2));
        assert_eq!(wait, WaitTime::between(Duration::from_secs(2), Duration::from_secs(5)));
    }

    #[test]
    fn test_default_matches_config_default() {
        let wait = WaitTime::default();
        assert_eq!(wait, WaitTime::between(Duration::from_secs(1), Duration::from_secs(3)));
    }
}
