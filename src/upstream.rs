use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::Settings;

/// Result of asking the report host for one rendered report.
#[derive(Debug, PartialEq)]
pub enum Fetched {
    Svg(String),
    /// The host answered, but not with a success status.
    Rejected(u16),
}

#[async_trait]
pub trait Upstream: Send + Sync {
    async fn fetch_svg(&self, hash: &str) -> Result<Fetched>;
}

/// The public host serving `/ip/<hash>.svg`.
pub struct ReportHost {
    client: reqwest::Client,
    host: String,
}

impl ReportHost {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&settings.user_agent)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            host: settings.report_host.clone(),
        })
    }

    pub fn svg_url(&self, hash: &str) -> String {
        format!("https://{}/ip/{}.svg", self.host, hash)
    }
}

#[async_trait]
impl Upstream for ReportHost {
    async fn fetch_svg(&self, hash: &str) -> Result<Fetched> {
        let url = self.svg_url(hash);
        info!("Fetching report: {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Report host answered {} for {}", status, url);
            return Ok(Fetched::Rejected(status.as_u16()));
        }

        let svg = response
            .text()
            .await
            .with_context(|| format!("Failed to read body of {}", url))?;
        Ok(Fetched::Svg(svg))
    }
}
