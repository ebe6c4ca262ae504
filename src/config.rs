//! Engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::index::embedder::DEFAULT_DIMENSIONS;

/// Tunables for the intent resolution engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// How many candidates to retrieve from the index per resolution.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Embedding vector length for the default provider.
    #[serde(default = "default_dimensions")]
    pub embedding_dimensions: usize,

    /// Reject the best candidate when its adjusted score falls below this
    /// floor. Applies only to the highest-score selection path; exact and
    /// partial example matches always resolve. `None` disables the floor.
    #[serde(default)]
    pub score_floor: Option<f32>,

    /// Name of the general system-information capability preferred for
    /// system-monitoring queries.
    #[serde(default = "default_general_system_capability")]
    pub general_system_capability: String,

    /// Bound on the async embedding/query step, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_top_k() -> usize {
    5
}

fn default_dimensions() -> usize {
    DEFAULT_DIMENSIONS
}

fn default_general_system_capability() -> String {
    "get_system_info".to_string()
}

fn default_timeout_ms() -> u64 {
    5_000
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            embedding_dimensions: default_dimensions(),
            score_floor: None,
            general_system_capability: default_general_system_capability(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl EngineConfig {
    /// The async resolution time bound as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
