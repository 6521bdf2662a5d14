use engine_logging::{engine_debug, engine_info};

use crate::view_model::{
    checklist_rows, upcoming_rows, ChecklistViewModel, UpcomingStatus, UrgencyView, ViewPhase,
};
use crate::{Checklist, ChecklistKey, LoadedChecklist, ProgressState, ProgressSummary};

/// Tags a load cycle so completions can be matched to the request that
/// produced them. Every open, close, retry or parameter change issues a new
/// generation; anything carrying an older ticket is stale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    pub generation: u64,
    pub key: ChecklistKey,
}

/// Tags one upcoming-list fetch. Only the most recently issued one is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UpcomingTicket(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingInterview {
    pub job_id: String,
    pub company_name: String,
    pub position: String,
    pub stage: String,
    pub status: String,
    pub schedule_date: String,
    pub days_until: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum Session {
    #[default]
    Closed,
    Loading {
        ticket: LoadTicket,
        days_until: Option<i64>,
    },
    Failed {
        ticket: LoadTicket,
        days_until: Option<i64>,
        message: String,
    },
    Ready {
        ticket: LoadTicket,
        days_until: Option<i64>,
        checklist: Checklist,
        progress: ProgressState,
        saves_in_flight: usize,
    },
}

impl Session {
    fn ticket(&self) -> Option<&LoadTicket> {
        match self {
            Session::Closed => None,
            Session::Loading { ticket, .. }
            | Session::Failed { ticket, .. }
            | Session::Ready { ticket, .. } => Some(ticket),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum Upcoming {
    #[default]
    NotRequested,
    Loading,
    Loaded(Vec<UpcomingInterview>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChecklistState {
    generation: u64,
    session: Session,
    upcoming_generation: u64,
    upcoming: Upcoming,
    dirty: bool,
}

impl ChecklistState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ChecklistViewModel {
        let mut view = ChecklistViewModel {
            upcoming: match &self.upcoming {
                Upcoming::Loaded(entries) => upcoming_rows(entries),
                _ => Vec::new(),
            },
            upcoming_status: match &self.upcoming {
                Upcoming::NotRequested => UpcomingStatus::NotRequested,
                Upcoming::Loading => UpcomingStatus::Loading,
                Upcoming::Loaded(_) => UpcomingStatus::Loaded,
                Upcoming::Failed(message) => UpcomingStatus::Failed {
                    message: message.clone(),
                },
            },
            dirty: self.dirty,
            ..ChecklistViewModel::default()
        };

        let (ticket, days_until) = match &self.session {
            Session::Closed => return view,
            Session::Loading { ticket, days_until } => {
                view.phase = ViewPhase::Loading;
                (ticket, *days_until)
            }
            Session::Failed {
                ticket,
                days_until,
                message,
            } => {
                view.phase = ViewPhase::Failed {
                    message: message.clone(),
                };
                view.can_retry = true;
                (ticket, *days_until)
            }
            Session::Ready {
                ticket,
                days_until,
                checklist,
                progress,
                saves_in_flight,
            } => {
                view.phase = ViewPhase::Ready;
                view.title = Some(checklist.display_title(&ticket.key.stage));
                view.ai_generated = checklist.ai_generated;
                view.rows = checklist_rows(checklist, progress);
                view.summary = progress.summary(checklist);
                view.saving = *saves_in_flight > 0;
                (ticket, *days_until)
            }
        };

        view.job_id = Some(ticket.key.job_id.clone());
        view.stage = Some(ticket.key.stage.clone());
        view.company = Some(ticket.key.company.clone()).filter(|c| !c.is_empty());
        view.urgency = days_until.map(UrgencyView::from_days);
        view
    }

    /// Returns and clears the dirty flag; callers re-render when it was set.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        self.session.ticket() == Some(ticket)
    }

    pub fn current_ticket(&self) -> Option<&LoadTicket> {
        self.session.ticket()
    }

    pub fn summary(&self) -> ProgressSummary {
        match &self.session {
            Session::Ready {
                checklist,
                progress,
                ..
            } => progress.summary(checklist),
            _ => ProgressSummary::default(),
        }
    }

    pub fn completed_ids(&self) -> Vec<String> {
        match &self.session {
            Session::Ready { progress, .. } => progress.to_vec(),
            _ => Vec::new(),
        }
    }

    pub fn upcoming_entry(&self, index: usize) -> Option<&UpcomingInterview> {
        match &self.upcoming {
            Upcoming::Loaded(entries) => entries.get(index),
            _ => None,
        }
    }

    fn next_ticket(&mut self, key: ChecklistKey) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            generation: self.generation,
            key,
        }
    }

    /// Starts a load cycle for `key`. Returns `None` when the view is
    /// already loading or showing the same key.
    pub(crate) fn open(
        &mut self,
        key: ChecklistKey,
        days_until: Option<i64>,
    ) -> Option<LoadTicket> {
        let same_key_active = match &self.session {
            Session::Loading { ticket, .. } | Session::Ready { ticket, .. } => ticket.key == key,
            Session::Closed | Session::Failed { .. } => false,
        };
        if same_key_active {
            match &mut self.session {
                Session::Loading { days_until: d, .. } | Session::Ready { days_until: d, .. }
                    if *d != days_until =>
                {
                    *d = days_until;
                    self.dirty = true;
                }
                _ => {}
            }
            return None;
        }

        let ticket = self.next_ticket(key);
        engine_info!(
            "Opening checklist generation={} job_id={} stage={}",
            ticket.generation,
            ticket.key.job_id,
            ticket.key.stage
        );
        self.session = Session::Loading {
            ticket: ticket.clone(),
            days_until,
        };
        self.dirty = true;
        Some(ticket)
    }

    pub(crate) fn close(&mut self) {
        if self.session == Session::Closed {
            return;
        }
        self.session = Session::Closed;
        self.dirty = true;
    }

    pub(crate) fn retry(&mut self) -> Option<LoadTicket> {
        let (key, days_until) = match &self.session {
            Session::Failed {
                ticket, days_until, ..
            } => (ticket.key.clone(), *days_until),
            _ => return None,
        };
        let ticket = self.next_ticket(key);
        self.session = Session::Loading {
            ticket: ticket.clone(),
            days_until,
        };
        self.dirty = true;
        Some(ticket)
    }

    pub(crate) fn apply_loaded(
        &mut self,
        ticket: &LoadTicket,
        result: Result<LoadedChecklist, String>,
    ) {
        let days_until = match &self.session {
            Session::Loading {
                ticket: current,
                days_until,
            } if current == ticket => *days_until,
            _ => {
                engine_debug!(
                    "Discarding stale checklist load generation={} stage={}",
                    ticket.generation,
                    ticket.key.stage
                );
                return;
            }
        };

        self.session = match result {
            Ok(loaded) => Session::Ready {
                ticket: ticket.clone(),
                days_until,
                checklist: loaded.checklist,
                progress: ProgressState::from_ids(loaded.completed_ids),
                saves_in_flight: 0,
            },
            Err(message) => Session::Failed {
                ticket: ticket.clone(),
                days_until,
                message,
            },
        };
        self.dirty = true;
    }

    /// Applies a toggle locally and returns the save to issue.
    pub(crate) fn toggle_item(&mut self, item_id: &str) -> Option<(LoadTicket, Vec<String>)> {
        match &mut self.session {
            Session::Ready {
                ticket,
                progress,
                saves_in_flight,
                ..
            } => {
                let completed_items = progress.toggle(item_id).iter().cloned().collect();
                *saves_in_flight += 1;
                self.dirty = true;
                Some((ticket.clone(), completed_items))
            }
            _ => None,
        }
    }

    pub(crate) fn apply_saved(&mut self, ticket: &LoadTicket, result: Result<(), String>) {
        match &mut self.session {
            Session::Ready {
                ticket: current,
                saves_in_flight,
                ..
            } if *current == *ticket => {
                *saves_in_flight = saves_in_flight.saturating_sub(1);
                self.dirty = true;
            }
            _ => {
                engine_debug!(
                    "Ignoring save completion for generation={}",
                    ticket.generation
                );
            }
        }
        // Local state is kept on failure; the next toggle carries it forward.
        if let Err(message) = result {
            engine_debug!(
                "Progress save failed job_id={} stage={}: {}",
                ticket.key.job_id,
                ticket.key.stage,
                message
            );
        }
    }

    pub(crate) fn request_upcoming(&mut self) -> UpcomingTicket {
        self.upcoming_generation += 1;
        self.upcoming = Upcoming::Loading;
        self.dirty = true;
        UpcomingTicket(self.upcoming_generation)
    }

    pub(crate) fn apply_upcoming(
        &mut self,
        ticket: UpcomingTicket,
        result: Result<Vec<UpcomingInterview>, String>,
    ) {
        if ticket.0 != self.upcoming_generation {
            engine_debug!(
                "Discarding stale upcoming list request={} latest={}",
                ticket.0,
                self.upcoming_generation
            );
            return;
        }
        self.upcoming = match result {
            Ok(mut entries) => {
                entries.sort_by_key(|entry| entry.days_until);
                Upcoming::Loaded(entries)
            }
            Err(message) => Upcoming::Failed(message),
        };
        self.dirty = true;
    }
}
