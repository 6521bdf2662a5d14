use engine_logging::{engine_info, engine_warn};
use futures_util::future::join;

use crate::{ApiError, ChecklistApi, ChecklistQuery, LoadedChecklist, SessionToken};

/// Fetches checklist content and saved progress concurrently and merges them.
///
/// Checklist content is required: its failure fails the load. Progress is
/// best-effort: its failure is logged and the load resolves with an empty set.
/// Items beyond `max_items` are dropped.
pub async fn load_checklist(
    api: &dyn ChecklistApi,
    token: &SessionToken,
    query: &ChecklistQuery,
    max_items: Option<usize>,
) -> Result<LoadedChecklist, ApiError> {
    engine_info!(
        "Loading checklist job_id={} stage={} company={:?}",
        query.job_id,
        query.stage,
        query.company
    );

    let (checklist, progress) = join(
        api.fetch_checklist(token, &query.stage, &query.company),
        api.fetch_progress(token, &query.job_id, &query.stage),
    )
    .await;

    let mut checklist = checklist?;
    if let Some(max) = max_items {
        checklist.items.truncate(max);
    }

    let (completed_items, progress_error) = match progress {
        Ok(progress) => (progress.completed_items, None),
        Err(err) => {
            engine_warn!(
                "Saved progress unavailable for job_id={} stage={}: {}",
                query.job_id,
                query.stage,
                err
            );
            (Vec::new(), Some(err))
        }
    };

    Ok(LoadedChecklist {
        checklist,
        completed_items,
        progress_error,
    })
}
