use color_eyre::{eyre::eyre, Result};
use tracing::debug;
use url::Url;

use crate::config::Config;

use super::FetchError;

/// Placeholder substituted with the resource stub in URL templates.
pub const STUB_PLACEHOLDER: &str = "{stub}";

/// Source of raw resource documents.
#[allow(async_fn_in_trait)]
pub trait RemoteSource {
  /// Fetch the raw document body for `stub`.
  async fn fetch(&self, stub: &str) -> Result<String, FetchError>;
}

/// Fetches resources over HTTP from a templated share URL
#[derive(Clone)]
pub struct HttpSource {
  client: reqwest::Client,
  url_template: String,
}

impl HttpSource {
  pub fn new(config: &Config) -> Result<Self> {
    let client = reqwest::Client::builder()
      .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self {
      client,
      url_template: config.url_template.clone(),
    })
  }
}

impl RemoteSource for HttpSource {
  async fn fetch(&self, stub: &str) -> Result<String, FetchError> {
    let url = resource_url(&self.url_template, stub)?;
    debug!(%url, "fetching resource");

    let response = self.client.get(url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
      return Err(FetchError::Status {
        url: url.to_string(),
        status: status.as_u16(),
      });
    }

    Ok(response.text().await?)
  }
}

/// Build the download URL for `stub` from `template`.
pub fn resource_url(template: &str, stub: &str) -> Result<Url, FetchError> {
  let raw = template.replace(STUB_PLACEHOLDER, stub);
  Url::parse(&raw).map_err(|source| FetchError::Url { url: raw, source })
}
