use crate::{ChecklistKey, ChecklistState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ChecklistState, msg: Msg) -> (ChecklistState, Vec<Effect>) {
    let effects = match msg {
        Msg::ChecklistOpened { key, days_until } => load_effect(state.open(key, days_until)),
        Msg::UpcomingSelected { index } => {
            let Some(entry) = state.upcoming_entry(index) else {
                return (state, Vec::new());
            };
            let key = ChecklistKey::new(&entry.job_id, &entry.stage, &entry.company_name);
            let days_until = Some(entry.days_until);
            load_effect(state.open(key, days_until))
        }
        Msg::ChecklistClosed => {
            state.close();
            Vec::new()
        }
        Msg::RetryClicked => load_effect(state.retry()),
        Msg::ChecklistLoaded { ticket, result } => {
            state.apply_loaded(&ticket, result);
            Vec::new()
        }
        Msg::ItemToggled { item_id } => match state.toggle_item(&item_id) {
            Some((ticket, completed_items)) => vec![Effect::SaveProgress {
                ticket,
                completed_items,
            }],
            None => Vec::new(),
        },
        Msg::ProgressSaved { ticket, result } => {
            state.apply_saved(&ticket, result);
            Vec::new()
        }
        Msg::UpcomingRequested => vec![Effect::FetchUpcoming {
            ticket: state.request_upcoming(),
        }],
        Msg::UpcomingLoaded { ticket, result } => {
            state.apply_upcoming(ticket, result);
            Vec::new()
        }
    };

    (state, effects)
}

fn load_effect(ticket: Option<crate::LoadTicket>) -> Vec<Effect> {
    ticket
        .map(|ticket| vec![Effect::LoadChecklist { ticket }])
        .unwrap_or_default()
}
