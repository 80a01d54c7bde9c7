//! Service settings.

use std::time::Duration;

use serde::Deserialize;

const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 8;

#[derive(Debug, Clone, Deserialize)]
pub struct WorkloadSettings {
    pub database_url: String,
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,
}

fn default_query_timeout_secs() -> u64 {
    DEFAULT_QUERY_TIMEOUT_SECS
}

impl WorkloadSettings {
    /// Loads settings from an optional `workload.toml` and `WORKLOAD_*`
    /// environment variables, the environment taking precedence.
    pub fn load() -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("workload").required(false))
            .add_source(config::Environment::with_prefix("WORKLOAD"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}
