use serde::{Deserialize, Serialize};

/// Host-side tunables. Loaded from JSON by the embedder or filled from
/// `Default` for tests and tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Size in bytes of the memory buffer shared with each environment.
    pub guest_memory_len: usize,
    /// Hard cap on resources a single environment may own at once.
    pub env_resource_quota: usize,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            guest_memory_len: 1 << 20,
            env_resource_quota: 4096,
        }
    }
}

impl HostConfig {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg = HostConfig::from_json(r#"{"env_resource_quota": 16}"#).unwrap();
        assert_eq!(cfg.env_resource_quota, 16);
        assert_eq!(cfg.guest_memory_len, HostConfig::default().guest_memory_len);
    }
}
