use std::fmt;

use serde::{Deserialize, Serialize};

/// Correlates an engine command with the event it produces.
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub company_specific: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ChecklistResponse {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub ai_generated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ProgressResponse {
    #[serde(default)]
    pub completed_items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveProgressRequest {
    pub job_id: String,
    pub stage: String,
    pub completed_items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpcomingInterview {
    pub job_id: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub schedule_date: Option<String>,
    #[serde(default)]
    pub days_until: i64,
}

/// Parameters of one checklist load: content is keyed by (stage, company),
/// saved progress by (job_id, stage).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChecklistQuery {
    pub job_id: String,
    pub stage: String,
    pub company: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedChecklist {
    pub checklist: ChecklistResponse,
    /// Empty when the progress fetch failed.
    pub completed_items: Vec<String>,
    pub progress_error: Option<ApiError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ChecklistLoaded {
        request_id: RequestId,
        query: ChecklistQuery,
        result: Result<LoadedChecklist, ApiError>,
    },
    ProgressSaved {
        request_id: RequestId,
        job_id: String,
        stage: String,
        result: Result<(), ApiError>,
    },
    UpcomingLoaded {
        request_id: RequestId,
        result: Result<Vec<UpcomingInterview>, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "invalid response body"),
        }
    }
}
