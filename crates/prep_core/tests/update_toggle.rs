mod common;

use common::{init_logging, ready, toggle};
use pretty_assertions::assert_eq;
use prep_core::{update, ChecklistState, Effect, Msg};

fn saved_items(effects: &[Effect]) -> Vec<String> {
    match effects {
        [Effect::SaveProgress {
            completed_items, ..
        }] => completed_items.clone(),
        other => panic!("expected a single save effect, got {other:?}"),
    }
}

#[test]
fn third_toggle_updates_summary_and_saves_full_set() {
    init_logging();
    let (state, ticket) = ready(&["a", "b", "c", "d", "e"], &["a", "b"]);

    let (mut state, effects) = toggle(state, "e");
    let view = state.view();

    assert_eq!(view.summary.completed, 3);
    assert_eq!(view.summary.percent, 60);
    assert_eq!(state.summary(), view.summary);
    assert!(view.rows[4].checked);
    assert!(view.saving);
    assert_eq!(
        effects,
        vec![Effect::SaveProgress {
            ticket,
            completed_items: vec!["a".to_string(), "b".to_string(), "e".to_string()],
        }]
    );
    assert!(state.consume_dirty());
}

#[test]
fn toggling_twice_restores_original_state() {
    init_logging();
    let (state, _ticket) = ready(&["a", "b", "c"], &["a"]);
    let before = state.completed_ids();

    let (state, first) = toggle(state, "c");
    let (state, second) = toggle(state, "c");

    assert_eq!(state.completed_ids(), before);
    assert_eq!(saved_items(&first), vec!["a".to_string(), "c".to_string()]);
    assert_eq!(saved_items(&second), vec!["a".to_string()]);
}

#[test]
fn unknown_id_is_kept_but_never_rendered() {
    init_logging();
    let (state, _ticket) = ready(&["a", "b"], &[]);

    let (state, effects) = toggle(state, "ghost");

    assert_eq!(saved_items(&effects), vec!["ghost".to_string()]);
    assert_eq!(state.completed_ids(), vec!["ghost".to_string()]);
    let view = state.view();
    assert!(view.rows.iter().all(|row| !row.checked));
    assert_eq!(view.summary.completed, 0);
    assert_eq!(view.summary.percent, 0);
}

#[test]
fn every_toggle_issues_its_own_save() {
    init_logging();
    let (state, _ticket) = ready(&["a", "b", "c"], &[]);

    let (state, first) = toggle(state, "a");
    let (state, second) = toggle(state, "b");

    assert_eq!(saved_items(&first), vec!["a".to_string()]);
    assert_eq!(saved_items(&second), vec!["a".to_string(), "b".to_string()]);
    assert!(state.view().saving);
}

#[test]
fn saving_clears_once_all_saves_complete() {
    init_logging();
    let (state, ticket) = ready(&["a", "b"], &[]);
    let (state, _) = toggle(state, "a");
    let (state, _) = toggle(state, "b");

    let (state, _) = update(
        state,
        Msg::ProgressSaved {
            ticket: ticket.clone(),
            result: Ok(()),
        },
    );
    assert!(state.view().saving);

    let (state, effects) = update(
        state,
        Msg::ProgressSaved {
            ticket,
            result: Ok(()),
        },
    );
    assert!(effects.is_empty());
    assert!(!state.view().saving);
}

#[test]
fn failed_save_keeps_local_state_and_does_not_retry() {
    init_logging();
    let (state, ticket) = ready(&["a", "b"], &[]);
    let (state, _) = toggle(state, "a");

    let (state, effects) = update(
        state,
        Msg::ProgressSaved {
            ticket,
            result: Err("network error".to_string()),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.saving);
    assert!(view.rows[0].checked);
    assert_eq!(view.summary.completed, 1);
}

#[test]
fn toggle_before_load_is_ignored() {
    init_logging();
    let (state, effects) = toggle(ChecklistState::new(), "a");

    assert!(effects.is_empty());
    assert!(state.completed_ids().is_empty());
}
