use std::time::Duration;

use anyhow::Context;
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use reqwest::{header, Client};
use thiserror::Error;
use url::Url;

use crate::{
    config::{HttpClientConfig, PlagiarismConfig},
    util::html::html_to_text,
};

#[derive(Debug, Error)]
pub enum PageFetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("page exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

/// Downloads a page and reduces it to visible text.
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
    max_bytes: usize,
}

impl PageFetcher {
    pub fn new(http: &HttpClientConfig, config: &PlagiarismConfig) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.url_fetch_timeout_secs.max(1));
        let client = http
            .apply(Client::builder())
            .context("failed to apply proxy settings for page fetcher")?
            .timeout(timeout)
            .build()
            .context("failed to build page fetcher client")?;

        Ok(Self {
            client,
            max_bytes: config.url_fetch_max_bytes.max(1),
        })
    }

    pub async fn fetch_text(&self, raw_url: &str) -> Result<String, PageFetchError> {
        let url = parse_http_url(raw_url)?;

        let mut response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PageFetchError::Status(status.as_u16()));
        }

        let charset = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(charset_from_content_type)
            .map(str::to_string);

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(PageFetchError::TooLarge {
                    limit: self.max_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        let html = decode_body(&body, charset.as_deref());
        let text = html_to_text(&html);
        tracing::debug!(
            bytes = body.len(),
            chars = text.chars().count(),
            "page text extracted"
        );
        Ok(text)
    }
}

fn parse_http_url(raw: &str) -> Result<Url, PageFetchError> {
    let url = Url::parse(raw.trim()).map_err(|err| PageFetchError::InvalidUrl(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(PageFetchError::InvalidUrl(format!(
            "unsupported scheme {other:?}"
        ))),
    }
}

fn charset_from_content_type(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    })
}

/// Decodes with the declared charset, or a detected one when none is
/// declared or the label is unknown.
fn decode_body(body: &[u8], charset: Option<&str>) -> String {
    let encoding = charset
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or_else(|| {
            let mut detector = EncodingDetector::new();
            detector.feed(body, true);
            detector.guess(None, true)
        });
    let (text, _, _) = encoding.decode(body);
    text.into_owned()
}
