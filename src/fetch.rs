//!
//! src/fetch.rs
//!
//! Builds the blocking http client and fetches the public likes
//! page for a profile. One GET per run, no retries: a failed
//! fetch aborts the whole run
//!

use url::Url;
use reqwest::{blocking::Client, header, redirect};
use crate::config::{HttpConfig, SoundCloudConfig};
use crate::BadgeError;

#[derive(Debug, Clone)]
pub struct LikesClient {
    http: Client,
    base: Url,
}

impl LikesClient {
    pub fn new(http_config: &HttpConfig, site: &SoundCloudConfig) ->
        Result<Self, BadgeError> {

        let mut h = header::HeaderMap::new();
        h.insert(header::ACCEPT, header::HeaderValue::from_static("text/html"));

        let http = Client::builder()
            .timeout(http_config.timeout)
            .connect_timeout(http_config.connect_timeout)
            .redirect(redirect::Policy::limited(http_config.max_redirects as usize))
            .default_headers(h)
            .user_agent(site.user_agent.as_str())
            .build()
            .map_err(|e| BadgeError::Fetch(format!("build client: {e}")))?;

        Ok( Self {
            http,
            base: site.base_url.clone()
        })
    }

    /// GET https://soundcloud.com/{username}/likes
    pub fn likes_url(&self, username: &str) -> Result<Url, BadgeError> {
        self.base.join(&format!("{username}/likes"))
            .map_err(|e| BadgeError::Config(
                format!("likes url for {username}: {e}")
            ))
    }

    pub fn likes_page(&self, url: &Url) -> Result<String, BadgeError> {
        tracing::debug!(url = %url, "fetch.likes");

        let response = self.http.get(url.clone()).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(BadgeError::Fetch(
                format!("status {status} for {url}")
            ));
        }

        Ok(response.text()?)
    }
}
