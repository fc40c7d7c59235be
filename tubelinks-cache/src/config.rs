//! Cache configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use tubelinks_core::constants::{DEFAULT_CLEANUP_PROBABILITY, DEFAULT_TTL_SECONDS};
use tubelinks_core::error::{Result, TubelinksError};

/// Cache configuration, fixed for the life of the cache.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum age of an entry in seconds
    pub ttl_seconds: u64,
    /// Chance that a request runs a cleanup pass, in `[0.0, 1.0]`
    pub cleanup_probability: f64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_TTL_SECONDS,
            cleanup_probability: DEFAULT_CLEANUP_PROBABILITY,
        }
    }
}

impl CacheConfig {
    /// Returns the TTL as a `Duration`.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    /// Rejects a zero TTL or a probability outside `[0.0, 1.0]`.
    pub fn validate(&self) -> Result<()> {
        if self.ttl_seconds == 0 {
            return Err(TubelinksError::ConfigError(
                "cache TTL must be at least one second".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.cleanup_probability) {
            return Err(TubelinksError::ConfigError(format!(
                "cleanup probability must be within [0, 1], got {}",
                self.cleanup_probability
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl(), Duration::from_secs(3600));
        assert_eq!(config.cleanup_probability, 0.10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_ttl = CacheConfig { ttl_seconds: 0, ..Default::default() };
        assert!(zero_ttl.validate().is_err());

        let too_likely = CacheConfig { cleanup_probability: 1.5, ..Default::default() };
        assert!(too_likely.validate().is_err());

        let nan = CacheConfig { cleanup_probability: f64::NAN, ..Default::default() };
        assert!(nan.validate().is_err());
    }
}
