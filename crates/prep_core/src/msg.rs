use crate::{Checklist, ChecklistKey, LoadTicket, UpcomingInterview, UpcomingTicket};

/// Result of a load cycle as seen by the core: checklist content plus the
/// saved progress (already defaulted to empty when the progress fetch failed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedChecklist {
    pub checklist: Checklist,
    pub completed_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Checklist view became visible for a (job, stage, company).
    ChecklistOpened {
        key: ChecklistKey,
        days_until: Option<i64>,
    },
    /// User opened the checklist for an entry of the upcoming list.
    UpcomingSelected { index: usize },
    /// Checklist view was hidden.
    ChecklistClosed,
    /// User asked to re-issue a failed load.
    RetryClicked,
    /// User tapped a checklist row.
    ItemToggled { item_id: String },
    /// Engine finished a load cycle.
    ChecklistLoaded {
        ticket: LoadTicket,
        result: Result<LoadedChecklist, String>,
    },
    /// Engine finished a progress save.
    ProgressSaved {
        ticket: LoadTicket,
        result: Result<(), String>,
    },
    /// User asked for the upcoming interview list.
    UpcomingRequested,
    /// Engine returned the upcoming interview list.
    UpcomingLoaded {
        ticket: UpcomingTicket,
        result: Result<Vec<UpcomingInterview>, String>,
    },
}
