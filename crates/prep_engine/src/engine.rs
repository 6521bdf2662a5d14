use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_warn};
use futures_util::future::join_all;

use crate::api::{ApiSettings, ChecklistApi, ReqwestChecklistApi, SessionToken};
use crate::load::load_checklist;
use crate::{ApiError, ChecklistQuery, EngineEvent, RequestId, SaveProgressRequest};

/// Upper bound on how long shutdown waits for commands already issued.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

enum EngineCommand {
    Load {
        request_id: RequestId,
        query: ChecklistQuery,
    },
    Save {
        request_id: RequestId,
        request: SaveProgressRequest,
    },
    FetchUpcoming {
        request_id: RequestId,
    },
}

struct EngineContext {
    api: Arc<dyn ChecklistApi>,
    token: SessionToken,
    max_items: Option<usize>,
}

/// Runs API commands on a background tokio runtime.
///
/// Commands are dispatched as independent tasks, so a load's two fetches and
/// any number of saves may be in flight at once. Results come back as
/// [`EngineEvent`]s in completion order.
///
/// Dropping the handle blocks until every command already issued has
/// finished, for at most five seconds.
pub struct EngineHandle {
    cmd_tx: Option<mpsc::Sender<EngineCommand>>,
    event_rx: mpsc::Receiver<EngineEvent>,
    worker: Option<thread::JoinHandle<()>>,
}

impl EngineHandle {
    pub fn new(settings: &ApiSettings, token: SessionToken) -> Result<Self, ApiError> {
        let api: Arc<dyn ChecklistApi> = Arc::new(ReqwestChecklistApi::new(settings)?);
        Ok(Self::with_api(api, token, settings.max_checklist_items))
    }

    /// Uses a caller-supplied API implementation.
    pub fn with_api(
        api: Arc<dyn ChecklistApi>,
        token: SessionToken,
        max_items: Option<usize>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let context = Arc::new(EngineContext {
            api,
            token,
            max_items,
        });

        let worker = thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let mut in_flight: Vec<tokio::task::JoinHandle<()>> = Vec::new();
            while let Ok(command) = cmd_rx.recv() {
                in_flight.retain(|task| !task.is_finished());
                let context = context.clone();
                let event_tx = event_tx.clone();
                in_flight.push(runtime.spawn(async move {
                    let event = handle_command(&context, command).await;
                    let _ = event_tx.send(event);
                }));
            }

            let pending = in_flight.len();
            let drained = runtime.block_on(async {
                tokio::time::timeout(DRAIN_TIMEOUT, join_all(in_flight)).await
            });
            if drained.is_err() {
                engine_warn!("Engine stopped with up to {} requests unfinished", pending);
            }
        });

        Self {
            cmd_tx: Some(cmd_tx),
            event_rx,
            worker: Some(worker),
        }
    }

    fn send(&self, command: EngineCommand) {
        if let Some(cmd_tx) = &self.cmd_tx {
            let _ = cmd_tx.send(command);
        }
    }

    pub fn load(&self, request_id: RequestId, query: ChecklistQuery) {
        self.send(EngineCommand::Load { request_id, query });
    }

    pub fn save(&self, request_id: RequestId, request: SaveProgressRequest) {
        self.send(EngineCommand::Save {
            request_id,
            request,
        });
    }

    pub fn fetch_upcoming(&self, request_id: RequestId) {
        self.send(EngineCommand::FetchUpcoming { request_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        // Closing the command channel ends the worker loop.
        self.cmd_tx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                engine_warn!("Engine worker panicked");
            }
        }
    }
}

async fn handle_command(context: &EngineContext, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::Load { request_id, query } => {
            let result = load_checklist(
                context.api.as_ref(),
                &context.token,
                &query,
                context.max_items,
            )
            .await;
            if let Err(err) = &result {
                engine_warn!(
                    "Checklist load failed request_id={} stage={}: {}",
                    request_id,
                    query.stage,
                    err
                );
            }
            EngineEvent::ChecklistLoaded {
                request_id,
                query,
                result,
            }
        }
        EngineCommand::Save {
            request_id,
            request,
        } => {
            let result = context.api.save_progress(&context.token, &request).await;
            match &result {
                Ok(()) => engine_debug!(
                    "Saved progress request_id={} job_id={} stage={}",
                    request_id,
                    request.job_id,
                    request.stage
                ),
                Err(err) => engine_warn!(
                    "Progress save failed request_id={} job_id={} stage={}: {}",
                    request_id,
                    request.job_id,
                    request.stage,
                    err
                ),
            }
            EngineEvent::ProgressSaved {
                request_id,
                job_id: request.job_id,
                stage: request.stage,
                result,
            }
        }
        EngineCommand::FetchUpcoming { request_id } => {
            let result = context.api.fetch_upcoming(&context.token).await;
            if let Err(err) = &result {
                engine_warn!(
                    "Upcoming interviews unavailable request_id={}: {}",
                    request_id,
                    err
                );
            }
            EngineEvent::UpcomingLoaded { request_id, result }
        }
    }
}
