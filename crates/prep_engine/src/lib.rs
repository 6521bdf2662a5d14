//! Prep engine: checklist API client, loader and effect execution.
mod api;
mod engine;
mod load;
mod types;

pub use api::{ApiSettings, ChecklistApi, ReqwestChecklistApi, SessionToken};
pub use engine::EngineHandle;
pub use load::load_checklist;
pub use types::{
    ApiError, ChecklistItem, ChecklistQuery, ChecklistResponse, EngineEvent, FailureKind,
    LoadedChecklist, ProgressResponse, RequestId, SaveProgressRequest, UpcomingInterview,
};
