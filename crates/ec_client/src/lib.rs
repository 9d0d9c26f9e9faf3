use async_trait::async_trait;
use ec_core::{messages, Error, ExposureApi, ExposureCheckResponse, Result, SearchRequest};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

/// Fixed endpoint of the exposure check service, relative to the base URL.
pub const CHECK_EXPOSURE_PATH: &str = "api/check-exposure";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

const DEFAULT_USER_AGENT: &str = concat!("ec/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn parse(base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url).map_err(|e| Error::InvalidUrl(format!("{base_url}: {e}")))?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(format!("{base_url}: not a base URL")));
        }
        Ok(Self::new(url))
    }

    /// `{base_url}/api/check-exposure`, keeping any path prefix on the base.
    pub fn endpoint(&self) -> Result<Url> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(CHECK_EXPOSURE_PATH)
            .map_err(|e| Error::InvalidUrl(e.to_string()))
    }
}

/// `ExposureApi` over HTTP. No timeout and no retries: a slow or failed
/// call is reported as-is.
#[derive(Debug, Clone)]
pub struct HttpExposureApi {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpExposureApi {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let endpoint = config.endpoint()?;
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| Error::Transport {
                status: None,
                message: format!("Failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ExposureApi for HttpExposureApi {
    async fn check_exposure(&self, request: &SearchRequest) -> Result<ExposureCheckResponse> {
        info!("🔎 Checking exposure of {} for '{}'", request.blog_url(), request.keyword());
        debug!(endpoint = %self.endpoint, "sending exposure check");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!("Exposure check request failed: {}", e);
                Error::network()
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            warn!("Failed to read exposure check response body: {}", e);
            Error::network()
        })?;
        debug!(status = status.as_u16(), bytes = body.len(), "exposure check answered");

        if !status.is_success() {
            let detail = detail_message(&body);
            warn!("Exposure check returned HTTP {}: {:?}", status, detail);
            return Err(Error::http_status(status.as_u16(), detail));
        }

        serde_json::from_slice::<ExposureCheckResponse>(&body).map_err(|e| {
            warn!("Exposure check response is not valid JSON: {}", e);
            Error::Transport {
                status: Some(status.as_u16()),
                message: messages::NETWORK_FAILURE.to_string(),
            }
        })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

/// Pulls a user-facing message out of an error body. Handles both a plain
/// `detail` string and a list of `{ "msg": ... }` validation entries.
fn detail_message(body: &[u8]) -> Option<String> {
    let body: ErrorBody = serde_json::from_slice(body).ok()?;
    match body.detail? {
        Value::String(detail) => Some(detail),
        Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join(", "))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_join() {
        let config = ClientConfig::parse("http://localhost:8000").unwrap();
        assert_eq!(config.endpoint().unwrap().as_str(), "http://localhost:8000/api/check-exposure");

        let config = ClientConfig::parse("https://example.com/exposure").unwrap();
        assert_eq!(
            config.endpoint().unwrap().as_str(),
            "https://example.com/exposure/api/check-exposure"
        );

        let config = ClientConfig::parse("https://example.com/exposure/").unwrap();
        assert_eq!(
            config.endpoint().unwrap().as_str(),
            "https://example.com/exposure/api/check-exposure"
        );
    }

    #[test]
    fn test_parse_rejects_bad_urls() {
        assert!(matches!(ClientConfig::parse("not a url"), Err(Error::InvalidUrl(_))));
        assert!(matches!(ClientConfig::parse("mailto:a@b.c"), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_detail_message() {
        assert_eq!(detail_message(br#"{"detail":"rate limited"}"#), Some("rate limited".to_string()));
        assert_eq!(
            detail_message(br#"{"detail":[{"loc":["body","keyword"],"msg":"field required"},{"msg":"too short"}]}"#),
            Some("field required, too short".to_string())
        );
        assert_eq!(detail_message(br#"{"detail":[]}"#), None);
        assert_eq!(detail_message(br#"{"detail":42}"#), None);
        assert_eq!(detail_message(br#"{"message":"x"}"#), None);
        assert_eq!(detail_message(b"<html>502</html>"), None);
    }
}
