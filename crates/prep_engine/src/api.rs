use std::fmt;
use std::time::Duration;

use engine_logging::engine_debug;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    ApiError, ChecklistResponse, FailureKind, ProgressResponse, SaveProgressRequest,
    UpcomingInterview,
};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Scheme, host and optional path prefix; `/api/...` is appended.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Checklists are truncated to this many items; `None` keeps them all.
    pub max_checklist_items: Option<usize>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8001".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_checklist_items: Some(5),
        }
    }
}

/// Bearer token for the signed-in user. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// Remote checklist endpoints consumed by the loader and the save path.
#[async_trait::async_trait]
pub trait ChecklistApi: Send + Sync {
    async fn fetch_checklist(
        &self,
        token: &SessionToken,
        stage: &str,
        company: &str,
    ) -> Result<ChecklistResponse, ApiError>;

    async fn fetch_progress(
        &self,
        token: &SessionToken,
        job_id: &str,
        stage: &str,
    ) -> Result<ProgressResponse, ApiError>;

    /// Writes the full completed set; the response body is ignored.
    async fn save_progress(
        &self,
        token: &SessionToken,
        request: &SaveProgressRequest,
    ) -> Result<(), ApiError>;

    async fn fetch_upcoming(
        &self,
        token: &SessionToken,
    ) -> Result<Vec<UpcomingInterview>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestChecklistApi {
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestChecklistApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let base_url = Url::parse(settings.base_url.trim())
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::new(
                FailureKind::InvalidUrl,
                format!("{base_url} cannot be used as a base url"),
            ));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { base_url, client })
    }

    /// `{base}/api/{segments...}`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|()| ApiError::new(FailureKind::InvalidUrl, "base url cannot be a base"))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let bytes = self.send(request).await?;
        serde_json::from_slice(&bytes)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(bytes.to_vec())
    }
}

#[async_trait::async_trait]
impl ChecklistApi for ReqwestChecklistApi {
    async fn fetch_checklist(
        &self,
        token: &SessionToken,
        stage: &str,
        company: &str,
    ) -> Result<ChecklistResponse, ApiError> {
        let mut url = self.endpoint(&["interview-checklist", stage])?;
        let company = company.trim();
        if !company.is_empty() {
            url.query_pairs_mut().append_pair("company", company);
        }
        engine_debug!("GET {}", url);
        self.send_json(self.client.get(url).bearer_auth(token.expose())).await
    }

    async fn fetch_progress(
        &self,
        token: &SessionToken,
        job_id: &str,
        stage: &str,
    ) -> Result<ProgressResponse, ApiError> {
        let url = self.endpoint(&["checklist-progress", job_id, stage])?;
        engine_debug!("GET {}", url);
        self.send_json(self.client.get(url).bearer_auth(token.expose())).await
    }

    async fn save_progress(
        &self,
        token: &SessionToken,
        request: &SaveProgressRequest,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["checklist-progress"])?;
        let body = serde_json::to_vec(request)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;
        engine_debug!(
            "PUT {} job_id={} stage={} items={}",
            url,
            request.job_id,
            request.stage,
            request.completed_items.len()
        );
        self.send(
            self.client
                .put(url)
                .bearer_auth(token.expose())
                .header(CONTENT_TYPE, "application/json")
                .body(body),
        )
        .await
        .map(|_| ())
    }

    async fn fetch_upcoming(
        &self,
        token: &SessionToken,
    ) -> Result<Vec<UpcomingInterview>, ApiError> {
        let url = self.endpoint(&["dashboard", "upcoming-interviews"])?;
        engine_debug!("GET {}", url);
        self.send_json(self.client.get(url).bearer_auth(token.expose())).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base_url: &str) -> ReqwestChecklistApi {
        ReqwestChecklistApi::new(&ApiSettings {
            base_url: base_url.to_string(),
            ..ApiSettings::default()
        })
        .expect("valid settings")
    }

    #[test]
    fn endpoint_appends_api_path_to_bare_host() {
        let url = api("http://localhost:8001")
            .endpoint(&["checklist-progress", "job-1", "phone_screen"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8001/api/checklist-progress/job-1/phone_screen"
        );
    }

    #[test]
    fn endpoint_keeps_path_prefix() {
        let url = api("https://example.com/tracker/")
            .endpoint(&["interview-checklist", "onsite"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/tracker/api/interview-checklist/onsite"
        );
    }

    #[test]
    fn endpoint_encodes_segments() {
        let url = api("http://localhost")
            .endpoint(&["interview-checklist", "final round/2"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost/api/interview-checklist/final%20round%2F2"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = ReqwestChecklistApi::new(&ApiSettings {
            base_url: "not a url".to_string(),
            ..ApiSettings::default()
        })
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = SessionToken::new("secret");
        assert_eq!(format!("{token:?}"), "SessionToken(..)");
        assert_eq!(token.expose(), "secret");
    }
}
