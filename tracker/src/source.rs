//! Where fresh element sets come from.

use crate::config::FeedConfig;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const CELESTRAK_GP_URL: &str = "https://celestrak.org/NORAD/elements/gp.php";

/// Element set format requested from the feed
pub const FEED_FORMAT: &str = "tle";

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Invalid feed URL")]
    Url(#[from] url::ParseError),
    #[error("Element set request to '{url}' failed")]
    Request {
        url: Url,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("Failed to read the element set response body")]
    Body(#[from] std::io::Error),
}

pub trait ElementSource {
    /// Raw feed text for a named satellite group (e.g. "stations")
    fn fetch_group(&mut self, group: &str) -> Result<String, SourceError>;
}

/// Celestrak's GP query endpoint
pub struct CelestrakSource {
    base: Url,
    agent: ureq::Agent,
}

impl CelestrakSource {
    pub fn new(base: Url, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self { base, agent }
    }

    pub fn from_config(cfg: &FeedConfig) -> Result<Self, SourceError> {
        let base = match &cfg.url {
            Some(url) => url.clone(),
            None => Url::parse(CELESTRAK_GP_URL)?,
        };
        Ok(Self::new(base, cfg.timeout))
    }

    pub fn group_url(&self, group: &str) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("GROUP", group)
            .append_pair("FORMAT", FEED_FORMAT);
        url
    }
}

impl ElementSource for CelestrakSource {
    fn fetch_group(&mut self, group: &str) -> Result<String, SourceError> {
        let url = self.group_url(group);
        debug!(%url, "Fetching element sets");
        let response = self
            .agent
            .get(url.as_str())
            .call()
            .map_err(|e| SourceError::Request {
                url: url.clone(),
                source: Box::new(e),
            })?;
        Ok(response.into_string()?)
    }
}
