//! Runtime configuration from environment variables, with deployment
//! defaults matching the original wallboard (15 s refresh, 10 s dwell,
//! 5 s failure retry).

use std::time::Duration;

/// Runtime knobs for the wallboard core
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the data backend
    pub base_url: String,
    /// Interval between scheduled snapshot retrievals
    pub refresh: Duration,
    /// Delay before the single extra retry after a failed retrieval
    pub retry: Duration,
    /// How long a scene stays active before automatic rotation
    pub dwell: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("WALLBOARD_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
            refresh: env_secs("WALLBOARD_REFRESH_SECS", 15),
            retry: env_secs("WALLBOARD_RETRY_SECS", 5),
            dwell: env_secs("WALLBOARD_DWELL_SECS", 10),
        }
    }

    /// Full URL of the snapshot resource
    pub fn snapshot_url(&self) -> String {
        format!("{}/data/latest", self.base_url.trim_end_matches('/'))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            refresh: Duration::from_secs(15),
            retry: Duration::from_secs(5),
            dwell: Duration::from_secs(10),
        }
    }
}

fn env_secs(key: &str, default: u64) -> Duration {
    let secs = std::env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(default);
    Duration::from_secs(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_url_strips_trailing_slash() {
        let config = Config {
            base_url: "http://localhost:8000/".to_string(),
            ..Config::default()
        };
        assert_eq!(config.snapshot_url(), "http://localhost:8000/data/latest");
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.refresh, Duration::from_secs(15));
        assert_eq!(config.retry, Duration::from_secs(5));
        assert_eq!(config.dwell, Duration::from_secs(10));
    }
}
