use std::time::Duration;

use serde::Deserialize;

/// Scoring service configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ScorerConfig {
    /// Base URL of the scoring service. Default: "http://localhost:8000".
    #[serde(default = "default_scorer_url")]
    pub url: String,
    /// Connection-establish timeout in seconds. Default: 600.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Overall request deadline in seconds. Unset by default: analysis of long
    /// videos may legitimately take a long time.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_scorer_url() -> String {
    "http://localhost:8000".into()
}
fn default_connect_timeout_secs() -> u64 {
    600
}

impl ScorerConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            url: default_scorer_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: None,
        }
    }
}
