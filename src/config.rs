use std::path::PathBuf;

use anyhow::{Context, Result};
use ::config::{Config, Environment};
use serde::Deserialize;

const ENV_PREFIX: &str = "IPREPORT";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Address the HTTP service binds to.
    pub listen: String,
    /// SQLite file backing the report cache.
    pub db_path: PathBuf,
    /// Host serving the rendered `/ip/<hash>.svg` reports.
    pub report_host: String,
    pub user_agent: String,
}

impl Settings {
    /// Defaults overlaid with `IPREPORT_*` environment variables.
    pub fn load() -> Result<Self> {
        Self::from_env(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_env(env: Environment) -> Result<Self> {
        Config::builder()
            .set_default("listen", "0.0.0.0:8787")?
            .set_default("db_path", "data/ip_reports.sqlite")?
            .set_default("report_host", "report.check.place")?
            .set_default("user_agent", concat!("ip-report/", env!("CARGO_PKG_VERSION")))?
            .add_source(env)
            .build()?
            .try_deserialize()
            .context("Invalid IPREPORT_* settings")
    }
}
