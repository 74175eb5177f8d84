// src/core/net.rs
//
// Blocking HTTP GET. One request at a time, no retries.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::config::options::NetConfig;
use crate::error::{Error, Result};

/// The two requests the pipeline makes. Implemented by [`HttpClient`];
/// tests substitute an offline fake.
pub trait Fetch {
    /// Page body as text.
    fn get_text(&self, url: &str) -> Result<String>;

    /// Raw response body (audio).
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    pub fn new(cfg: &NetConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let ua = HeaderValue::from_str(&cfg.user_agent)
            .map_err(|e| Error::Config(format!("Invalid user agent: {e}")))?;
        headers.insert(USER_AGENT, ua);

        let inner = Client::builder()
            .default_headers(headers)
            .timeout(cfg.timeout)
            .build()?;
        Ok(Self { inner })
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response> {
        logd!("GET {url}");
        let res = self.inner.get(url).send()?;
        let status = res.status();
        if !status.is_success() {
            return Err(Error::Http(format!("{status} for {url}")));
        }
        Ok(res)
    }
}

impl Fetch for HttpClient {
    fn get_text(&self, url: &str) -> Result<String> {
        Ok(self.get(url)?.text()?)
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        Ok(self.get(url)?.bytes()?.to_vec())
    }
}
