use reqwest::header::CONTENT_TYPE;

use crate::{ProbeError, ProbeSettings};

/// Checks whether a poster URL would render as an image.
#[async_trait::async_trait]
pub trait PosterProber: Send + Sync {
    async fn probe(&self, url: &str) -> Result<(), ProbeError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestPosterProber {
    http: reqwest::Client,
}

impl ReqwestPosterProber {
    pub fn new(settings: &ProbeSettings) -> Result<Self, ProbeError> {
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|err| ProbeError::Network(err.to_string()))?;
        Ok(Self { http })
    }
}

#[async_trait::async_trait]
impl PosterProber for ReqwestPosterProber {
    async fn probe(&self, url: &str) -> Result<(), ProbeError> {
        let parsed =
            reqwest::Url::parse(url).map_err(|err| ProbeError::InvalidUrl(err.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ProbeError::InvalidUrl(format!(
                "unsupported scheme {}",
                parsed.scheme()
            )));
        }

        // Only the headers matter; the body is dropped unread.
        let response = self
            .http
            .get(parsed)
            .send()
            .await
            .map_err(|err| ProbeError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::HttpStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.split(';').next().unwrap_or(value).trim().to_string());
        match content_type {
            Some(ct) if !ct.to_ascii_lowercase().starts_with("image/") => {
                Err(ProbeError::NotAnImage { content_type: ct })
            }
            // Servers that omit the header get the benefit of the doubt.
            _ => Ok(()),
        }
    }
}
