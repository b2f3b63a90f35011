//! HTTP prober: one GET per candidate, no redirects, fixed timeout.

use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::header::{ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::redirect::Policy;
use reqwest::{Client, Proxy};

use crate::error::ProbeError;

pub const PROBE_TIMEOUT: Duration = Duration::from_secs(30);
/// The only status that counts as a hit.
pub const FOUND_STATUS: u16 = 200;

pub const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
pub const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";
pub const BROWSER_ACCEPT_ENCODING: &str = "gzip, deflate, br";

/// Result of probing one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Status(u16),
    Unreachable(ProbeError),
}

impl ProbeOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, ProbeOutcome::Status(FOUND_STATUS))
    }
}

/// Issues a single request for a candidate URL.
#[allow(async_fn_in_trait)]
pub trait Prober {
    async fn probe(&self, url: &str, agent: &str) -> ProbeOutcome;
}

/// Client options. Timeout and redirect policy are fixed.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    pub proxy: Option<String>,
    pub insecure: bool,
}

pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    pub fn new(options: &ClientOptions) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(PROBE_TIMEOUT)
            .redirect(Policy::none())
            .danger_accept_invalid_certs(options.insecure);

        if let Some(ref proxy_url) = options.proxy {
            let proxy = Proxy::all(proxy_url).map_err(|e| anyhow!("Invalid proxy {}: {}", proxy_url, e))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;
        Ok(Self { client })
    }
}

impl Prober for HttpProber {
    async fn probe(&self, url: &str, agent: &str) -> ProbeOutcome {
        let resp = self
            .client
            .get(url)
            .header(ACCEPT, BROWSER_ACCEPT)
            .header(ACCEPT_LANGUAGE, BROWSER_ACCEPT_LANGUAGE)
            .header(ACCEPT_ENCODING, BROWSER_ACCEPT_ENCODING)
            .header(USER_AGENT, agent)
            .send()
            .await;

        match resp {
            Ok(resp) => ProbeOutcome::Status(resp.status().as_u16()),
            Err(e) => ProbeOutcome::Unreachable(e.into()),
        }
    }
}
