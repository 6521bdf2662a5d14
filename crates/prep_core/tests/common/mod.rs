#![allow(dead_code)]

use std::sync::Once;

use prep_core::{
    update, Checklist, ChecklistItem, ChecklistKey, ChecklistState, Effect, LoadTicket,
    LoadedChecklist, Msg,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

pub fn key(stage: &str) -> ChecklistKey {
    ChecklistKey::new("job-1", stage, "Google")
}

pub fn items(ids: &[&str]) -> Vec<ChecklistItem> {
    ids.iter()
        .map(|id| ChecklistItem {
            id: id.to_string(),
            text: format!("Prepare {id}"),
            category: "research".to_string(),
            company_specific: false,
        })
        .collect()
}

pub fn loaded(ids: &[&str], completed: &[&str]) -> LoadedChecklist {
    LoadedChecklist {
        checklist: Checklist {
            title: Some("Phone Screen Prep".to_string()),
            company: Some("Google".to_string()),
            ai_generated: false,
            items: items(ids),
        },
        completed_ids: completed.iter().map(|id| id.to_string()).collect(),
    }
}

pub fn open(state: ChecklistState, key: ChecklistKey) -> (ChecklistState, LoadTicket) {
    let (state, effects) = update(
        state,
        Msg::ChecklistOpened {
            key,
            days_until: Some(3),
        },
    );
    let ticket = load_ticket(&effects).expect("load effect");
    (state, ticket)
}

pub fn load_ticket(effects: &[Effect]) -> Option<LoadTicket> {
    effects.iter().find_map(|effect| match effect {
        Effect::LoadChecklist { ticket } => Some(ticket.clone()),
        _ => None,
    })
}

/// Opens `phone_screen` and resolves the load with `ids`/`completed`.
pub fn ready(ids: &[&str], completed: &[&str]) -> (ChecklistState, LoadTicket) {
    let (state, ticket) = open(ChecklistState::new(), key("phone_screen"));
    let (state, effects) = update(
        state,
        Msg::ChecklistLoaded {
            ticket: ticket.clone(),
            result: Ok(loaded(ids, completed)),
        },
    );
    assert!(effects.is_empty());
    (state, ticket)
}

pub fn toggle(state: ChecklistState, item_id: &str) -> (ChecklistState, Vec<Effect>) {
    update(
        state,
        Msg::ItemToggled {
            item_id: item_id.to_string(),
        },
    )
}
