use reqwest::{redirect, Client};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::Duration;
use tracing::{info, warn};
use url::{Host, Url};

use crate::config::Config;
use crate::error::{AppError, Result};

const MAX_REDIRECTS: usize = 10;

/// Downloads the markup of a page submitted by URL.
pub struct FetcherService {
    client: Client,
    allow_private_hosts: bool,
    timeout_secs: u64,
}

impl FetcherService {
    pub fn new(config: &Config) -> Result<Self> {
        let allow_private_hosts = config.allow_private_hosts;

        // Every hop is checked, not only the submitted URL.
        let policy = redirect::Policy::custom(move |attempt| {
            if attempt.previous().len() >= MAX_REDIRECTS {
                return attempt.error("too many redirects");
            }
            if !allow_private_hosts && is_private_url(attempt.url()) {
                let target = attempt.url().to_string();
                return attempt.error(format!("redirect to {} is not allowed", target));
            }
            attempt.follow()
        });

        let client = Client::builder()
            .user_agent(config.fetch_user_agent.clone())
            .timeout(Duration::from_secs(config.fetch_timeout))
            .redirect(policy)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            allow_private_hosts,
            timeout_secs: config.fetch_timeout,
        })
    }

    pub fn validate_url(&self, url_str: &str) -> Result<Url> {
        let url = Url::parse(url_str)
            .map_err(|e| AppError::InvalidUrl(format!("Invalid URL format: {}", e)))?;

        if !["http", "https"].contains(&url.scheme()) {
            return Err(AppError::InvalidUrl(format!(
                "Invalid scheme: {}. Only http and https are allowed",
                url.scheme()
            )));
        }

        let host = url
            .host_str()
            .ok_or_else(|| AppError::InvalidUrl("URL must have a host".to_string()))?;

        if !self.allow_private_hosts && is_private_url(&url) {
            return Err(AppError::BlockedUrl(format!(
                "Access to {} is not allowed",
                host
            )));
        }

        Ok(url)
    }

    /// Single GET; a non-success status fails the request.
    pub async fn fetch(&self, url_str: &str) -> Result<String> {
        let url = self.validate_url(url_str)?;
        let response = self.send(&url).await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Origin {} responded with {}", url, status);
            return Err(AppError::Fetch(
                status
                    .canonical_reason()
                    .unwrap_or(status.as_str())
                    .to_string(),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Fetch(e.to_string()))?;

        info!("Fetched {} ({} bytes)", url, body.len());
        Ok(body)
    }

    async fn send(&self, url: &Url) -> Result<reqwest::Response> {
        self.client.get(url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Fetch(format!("timed out after {} seconds", self.timeout_secs))
            } else if e.is_redirect() {
                warn!("Rejected redirect while fetching {}: {:?}", url, e);
                AppError::Fetch(format!("redirect from {} was rejected", url))
            } else {
                AppError::Fetch(e.to_string())
            }
        })
    }
}

fn is_private_url(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => {
            let domain = domain.trim_end_matches('.').to_lowercase();
            domain == "localhost" || domain.ends_with(".localhost")
        }
        Some(Host::Ipv4(ip)) => is_private_ipv4(ip),
        Some(Host::Ipv6(ip)) => is_private_ipv6(ip),
        None => false,
    }
}

fn is_private_ipv4(ip: Ipv4Addr) -> bool {
    ip.is_loopback()
        || ip.is_private()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast()
}

fn is_private_ipv6(ip: Ipv6Addr) -> bool {
    if let Some(mapped) = ip.to_ipv4_mapped() {
        return is_private_ipv4(mapped);
    }

    let first = ip.segments()[0];
    ip.is_loopback()
        || ip.is_unspecified()
        // fe80::/10 link-local
        || (first & 0xffc0) == 0xfe80
        // fc00::/7 unique-local
        || (first & 0xfe00) == 0xfc00
}
