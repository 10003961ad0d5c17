use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect, Client, Response, Url};

use crate::{FailureKind, FetchError, FetchMetadata, FetchOutput};

/// Client string sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla 5.0";

/// Limits applied to every page request of a crawl.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub user_agent: String,
    pub connect_timeout: Duration,
    /// Whole request, body included.
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    /// Media types accepted when the server declares one.
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: vec!["text/html".into(), "application/xhtml+xml".into()],
        }
    }
}

/// Retrieves raw page bodies. The crawl engine only talks to this trait, so
/// tests can serve pages from memory.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError>;
}

/// [`Fetcher`] over a shared `reqwest` client, built once per crawl.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
    client: Client,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    /// Rejects a declared media type outside the allow list. Responses
    /// without a `Content-Type` header are accepted.
    fn accept_media_type(&self, declared: Option<&str>) -> Result<(), FetchError> {
        let Some(declared) = declared else {
            return Ok(());
        };
        let essence = declared.split(';').next().unwrap_or_default().trim();
        let allowed = self
            .settings
            .allowed_content_types
            .iter()
            .any(|media| media.eq_ignore_ascii_case(essence));
        if allowed {
            Ok(())
        } else {
            Err(FetchError::new(
                FailureKind::UnsupportedContentType {
                    content_type: declared.to_string(),
                },
                "unsupported content type",
            ))
        }
    }

    fn over_limit(&self, actual: u64) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }

    /// Streams the body, giving up as soon as it grows past `max_bytes`.
    async fn read_body(&self, response: Response) -> Result<Vec<u8>, FetchError> {
        if let Some(announced) = response.content_length() {
            if announced > self.settings.max_bytes {
                return Err(self.over_limit(announced));
            }
        }
        let mut body = Vec::new();
        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(classify)?;
            let grown = (body.len() + chunk.len()) as u64;
            if grown > self.settings.max_bytes {
                return Err(self.over_limit(grown));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        let target = web_url(url)?;
        let response = self.client.get(target).send().await.map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        self.accept_media_type(content_type.as_deref())?;

        let bytes = self.read_body(response).await?;
        Ok(FetchOutput {
            metadata: FetchMetadata {
                original_url: url.to_string(),
                final_url,
                content_type,
                byte_len: bytes.len() as u64,
            },
            bytes,
        })
    }
}

/// Parses `raw` and only lets http(s) through.
fn web_url(raw: &str) -> Result<Url, FetchError> {
    let url =
        Url::parse(raw).map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::new(
            FailureKind::InvalidUrl,
            format!("unsupported scheme {other}"),
        )),
    }
}

fn classify(err: reqwest::Error) -> FetchError {
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else if err.is_redirect() {
        FailureKind::RedirectLimitExceeded
    } else {
        FailureKind::Network
    };
    FetchError::new(kind, err.to_string())
}
