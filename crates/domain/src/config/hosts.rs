use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostsConfig {
    /// Hosts file used to answer queries. `None` disables answering.
    #[serde(default)]
    pub path: Option<String>,

    /// TTL, in seconds, attached to every answer built from the hosts file.
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

impl Default for HostsConfig {
    fn default() -> Self {
        Self {
            path: None,
            ttl: default_ttl(),
        }
    }
}

fn default_ttl() -> u32 {
    10
}
