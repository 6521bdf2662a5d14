use std::collections::HashMap;

use engine_logging::{engine_debug, engine_info};
use prep_core::{
    Checklist, ChecklistItem, Effect, LoadTicket, LoadedChecklist, Msg, UpcomingInterview,
    UpcomingTicket,
};
use prep_engine::{ChecklistQuery, EngineEvent, EngineHandle, RequestId, SaveProgressRequest};

/// The core ticket an engine request was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Pending {
    Checklist(LoadTicket),
    Upcoming(UpcomingTicket),
}

/// Executes core effects on the engine and turns engine events back into
/// messages, restoring the ticket each request was issued for.
pub struct EffectRunner {
    engine: EngineHandle,
    next_request_id: RequestId,
    pending: HashMap<RequestId, Pending>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            engine,
            next_request_id: 1,
            pending: HashMap::new(),
        }
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadChecklist { ticket } => {
                    engine_info!(
                        "LoadChecklist generation={} job_id={} stage={}",
                        ticket.generation,
                        ticket.key.job_id,
                        ticket.key.stage
                    );
                    let query = ChecklistQuery {
                        job_id: ticket.key.job_id.clone(),
                        stage: ticket.key.stage.clone(),
                        company: ticket.key.company.clone(),
                    };
                    let request_id = self.track(Pending::Checklist(ticket));
                    self.engine.load(request_id, query);
                }
                Effect::SaveProgress {
                    ticket,
                    completed_items,
                } => {
                    let request = SaveProgressRequest {
                        job_id: ticket.key.job_id.clone(),
                        stage: ticket.key.stage.clone(),
                        completed_items,
                    };
                    let request_id = self.track(Pending::Checklist(ticket));
                    self.engine.save(request_id, request);
                }
                Effect::FetchUpcoming { ticket } => {
                    let request_id = self.track(Pending::Upcoming(ticket));
                    self.engine.fetch_upcoming(request_id);
                }
            }
        }
    }

    /// Drains engine events that are ready without blocking.
    pub fn poll(&mut self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            if let Some(msg) = self.map_event(event) {
                inbox.push(msg);
            }
        }
        inbox
    }

    fn track(&mut self, pending: Pending) -> RequestId {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.pending.insert(request_id, pending);
        request_id
    }

    fn take_checklist(&mut self, request_id: RequestId) -> Option<LoadTicket> {
        match self.pending.remove(&request_id)? {
            Pending::Checklist(ticket) => Some(ticket),
            Pending::Upcoming(_) => None,
        }
    }

    fn map_event(&mut self, event: EngineEvent) -> Option<Msg> {
        match event {
            EngineEvent::ChecklistLoaded {
                request_id,
                query,
                result,
            } => {
                let Some(ticket) = self.take_checklist(request_id) else {
                    engine_debug!(
                        "Untracked load result request_id={} stage={}",
                        request_id,
                        query.stage
                    );
                    return None;
                };
                Some(Msg::ChecklistLoaded {
                    ticket,
                    result: result.map(map_loaded).map_err(|err| err.to_string()),
                })
            }
            EngineEvent::ProgressSaved {
                request_id, result, ..
            } => {
                let ticket = self.take_checklist(request_id)?;
                Some(Msg::ProgressSaved {
                    ticket,
                    result: result.map_err(|err| err.to_string()),
                })
            }
            EngineEvent::UpcomingLoaded { request_id, result } => {
                let Some(Pending::Upcoming(ticket)) = self.pending.remove(&request_id) else {
                    engine_debug!("Untracked upcoming result request_id={}", request_id);
                    return None;
                };
                Some(Msg::UpcomingLoaded {
                    ticket,
                    result: result
                        .map(|entries| entries.into_iter().map(map_upcoming).collect())
                        .map_err(|err| err.to_string()),
                })
            }
        }
    }
}

pub(crate) fn map_loaded(loaded: prep_engine::LoadedChecklist) -> LoadedChecklist {
    let response = loaded.checklist;
    LoadedChecklist {
        checklist: Checklist {
            title: response.title,
            company: response.company.filter(|company| !company.trim().is_empty()),
            ai_generated: response.ai_generated,
            items: response
                .items
                .into_iter()
                .map(|item| ChecklistItem {
                    id: item.id,
                    text: item.text,
                    category: item.category,
                    company_specific: item.company_specific.unwrap_or(false),
                })
                .collect(),
        },
        completed_ids: loaded.completed_items,
    }
}

pub(crate) fn map_upcoming(entry: prep_engine::UpcomingInterview) -> UpcomingInterview {
    UpcomingInterview {
        job_id: entry.job_id,
        company_name: entry.company_name.unwrap_or_default(),
        position: entry.position.unwrap_or_default(),
        stage: entry.stage.unwrap_or_default(),
        status: entry.status.unwrap_or_default(),
        schedule_date: entry.schedule_date.unwrap_or_default(),
        days_until: entry.days_until,
    }
}
