//! Prep checklist core: pure state machine and view-model helpers.
mod checklist;
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use checklist::{
    format_stage, Checklist, ChecklistItem, ChecklistKey, ProgressState, ProgressSummary,
};
pub use effect::Effect;
pub use msg::{LoadedChecklist, Msg};
pub use state::{ChecklistState, LoadTicket, UpcomingInterview, UpcomingTicket};
pub use update::update;
pub use view_model::{
    category_icon, urgency_label, ChecklistRowView, ChecklistViewModel, Palette, UpcomingRowView,
    UpcomingStatus, Urgency, UrgencyView, ViewPhase, DEFAULT_ICON, URGENT_COLOR, WARNING_COLOR,
};
