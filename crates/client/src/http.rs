use crate::config::{ClientConfig, Credentials};
use crate::error::{ClientError, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Paged list response; only the items are of interest.
#[derive(Deserialize, Debug)]
struct Page<T> {
    result: Vec<T>,
}

/// Thin JSON-over-HTTP wrapper shared by the accessors.
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    credentials: Option<Credentials>,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            inner,
            credentials: config.credentials.clone(),
        })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);
        let mut request = self.inner.get(url.clone());
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        decode(&url, &body)
    }

    /// GET a paged list and return the items of the `result` array.
    pub async fn get_list<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>> {
        let page: Page<T> = self.get_json(url).await?;
        Ok(page.result)
    }
}

fn decode<T: DeserializeOwned>(url: &Url, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| ClientError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Parse a service base URL.
pub fn parse_base(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        return Err(ClientError::NotABase(raw.to_string()));
    }
    Ok(url)
}

/// Append path segments to `base`, keeping any path prefix it already has.
pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ClientError::NotABase(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
