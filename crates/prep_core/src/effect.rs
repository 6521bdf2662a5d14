use crate::{LoadTicket, UpcomingTicket};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch checklist content and saved progress for the ticket's key.
    LoadChecklist { ticket: LoadTicket },
    /// Write the full completed set for the ticket's (job, stage) pair.
    SaveProgress {
        ticket: LoadTicket,
        completed_items: Vec<String>,
    },
    FetchUpcoming { ticket: UpcomingTicket },
}
