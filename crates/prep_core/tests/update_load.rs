mod common;

use common::{init_logging, key, load_ticket, loaded, open, ready};
use pretty_assertions::assert_eq;
use prep_core::{update, ChecklistState, Effect, Msg, ViewPhase};

#[test]
fn opening_emits_load_and_shows_loading() {
    init_logging();
    let (mut state, effects) = update(
        ChecklistState::new(),
        Msg::ChecklistOpened {
            key: key("phone_screen"),
            days_until: Some(1),
        },
    );

    let ticket = load_ticket(&effects).expect("load effect");
    assert_eq!(effects, vec![Effect::LoadChecklist { ticket: ticket.clone() }]);
    assert_eq!(ticket.key, key("phone_screen"));

    let view = state.view();
    assert_eq!(view.phase, ViewPhase::Loading);
    assert!(view.rows.is_empty());
    assert_eq!(view.urgency.as_ref().map(|u| u.label.as_str()), Some("TOMORROW"));
    assert!(state.consume_dirty());
}

#[test]
fn saved_progress_is_prechecked() {
    init_logging();
    let (state, _ticket) = ready(&["a", "b", "c", "d", "e"], &["b", "d"]);
    let view = state.view();

    assert_eq!(view.phase, ViewPhase::Ready);
    assert_eq!(view.rows.len(), 5);
    let checked: Vec<_> = view
        .rows
        .iter()
        .filter(|row| row.checked)
        .map(|row| row.item_id.as_str())
        .collect();
    assert_eq!(checked, vec!["b", "d"]);
    assert_eq!(view.summary.completed, 2);
    assert_eq!(view.summary.total, 5);
    assert_eq!(view.summary.percent, 40);
    assert_eq!(view.title.as_deref(), Some("Phone Screen Prep"));
    assert!(!view.saving);
}

#[test]
fn rows_keep_checklist_order_and_numbering() {
    init_logging();
    let (state, _ticket) = ready(&["z", "a", "m"], &[]);
    let rows = state.view().rows;

    let order: Vec<_> = rows.iter().map(|r| (r.number, r.item_id.as_str())).collect();
    assert_eq!(order, vec![(1, "z"), (2, "a"), (3, "m")]);
}

#[test]
fn empty_progress_after_progress_fallback_renders_all_items() {
    init_logging();
    // The engine hands over an empty set when the progress fetch failed.
    let (state, _ticket) = ready(&["a", "b", "c"], &[]);
    let view = state.view();

    assert_eq!(view.phase, ViewPhase::Ready);
    assert_eq!(view.rows.len(), 3);
    assert!(view.rows.iter().all(|row| !row.checked));
    assert_eq!(view.summary.percent, 0);
}

#[test]
fn empty_checklist_reports_zero_percent() {
    init_logging();
    let (state, _ticket) = ready(&[], &["stale"]);
    let view = state.view();

    assert_eq!(view.summary.total, 0);
    assert_eq!(view.summary.percent, 0);
}

#[test]
fn checklist_failure_renders_nothing_and_retry_reissues_request() {
    init_logging();
    let (state, ticket) = open(ChecklistState::new(), key("onsite"));
    let (state, effects) = update(
        state,
        Msg::ChecklistLoaded {
            ticket: ticket.clone(),
            result: Err("http status 500".to_string()),
        },
    );
    assert!(effects.is_empty());

    let view = state.view();
    assert_eq!(
        view.phase,
        ViewPhase::Failed {
            message: "http status 500".to_string()
        }
    );
    assert!(view.rows.is_empty());
    assert!(view.can_retry);

    let (state, effects) = update(state, Msg::RetryClicked);
    let retry_ticket = load_ticket(&effects).expect("retry load");
    assert_eq!(retry_ticket.key, ticket.key);
    assert_ne!(retry_ticket.generation, ticket.generation);
    assert_eq!(state.view().phase, ViewPhase::Loading);

    let (state, _) = update(
        state,
        Msg::ChecklistLoaded {
            ticket: retry_ticket,
            result: Ok(loaded(&["a"], &[])),
        },
    );
    assert_eq!(state.view().phase, ViewPhase::Ready);
}

#[test]
fn retry_is_ignored_unless_failed() {
    init_logging();
    let (state, _ticket) = ready(&["a"], &[]);
    let (next, effects) = update(state.clone(), Msg::RetryClicked);

    assert!(effects.is_empty());
    assert_eq!(next, state);
}

#[test]
fn reopening_same_key_while_loading_does_not_refetch() {
    init_logging();
    let (state, _ticket) = open(ChecklistState::new(), key("phone_screen"));
    let (_state, effects) = update(
        state,
        Msg::ChecklistOpened {
            key: key("phone_screen"),
            days_until: Some(3),
        },
    );

    assert!(effects.is_empty());
}
