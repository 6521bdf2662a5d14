//! Render-only values derived from the checklist state.

use crate::checklist::format_stage;
use crate::{Checklist, ProgressState, ProgressSummary, UpcomingInterview};

pub const URGENT_COLOR: &str = "#EF4444";
pub const WARNING_COLOR: &str = "#F59E0B";
pub const DEFAULT_ICON: &str = "checkmark-circle-outline";

const CATEGORY_ICONS: &[(&str, &str)] = &[
    ("research", "search"),
    ("preparation", "document-text"),
    ("technical", "code-slash"),
    ("stories", "chatbubbles"),
    ("questions", "help-circle"),
    ("pitch", "mic"),
    ("communication", "people"),
    ("compensation", "cash"),
    ("architecture", "git-network"),
    ("optimization", "speedometer"),
    ("practice", "fitness"),
    ("wellness", "heart"),
];

/// Color roles used by the front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub background: String,
    pub card: String,
    pub text: String,
    pub text_secondary: String,
    pub primary: String,
    pub border: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: "#0F172A".to_string(),
            card: "#1E293B".to_string(),
            text: "#F8FAFC".to_string(),
            text_secondary: "#94A3B8".to_string(),
            primary: "#6366F1".to_string(),
            border: "#334155".to_string(),
        }
    }
}

/// `0` (or overdue) is `Today`, `1..=2` is `Soon`, anything later is `Later`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Today,
    Soon,
    Later,
}

impl Urgency {
    pub fn from_days(days_until: i64) -> Self {
        match days_until {
            i64::MIN..=0 => Urgency::Today,
            1..=2 => Urgency::Soon,
            _ => Urgency::Later,
        }
    }

    pub fn color(self, palette: &Palette) -> &str {
        match self {
            Urgency::Today => URGENT_COLOR,
            Urgency::Soon => WARNING_COLOR,
            Urgency::Later => palette.primary.as_str(),
        }
    }
}

pub fn urgency_label(days_until: i64) -> String {
    match days_until.max(0) {
        0 => "TODAY".to_string(),
        1 => "TOMORROW".to_string(),
        n => format!("{n} DAYS"),
    }
}

pub fn category_icon(category: &str) -> &'static str {
    let category = category.trim();
    CATEGORY_ICONS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(category))
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrgencyView {
    pub days_until: i64,
    pub label: String,
    pub level: Urgency,
}

impl UrgencyView {
    pub fn from_days(days_until: i64) -> Self {
        Self {
            days_until,
            label: urgency_label(days_until),
            level: Urgency::from_days(days_until),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewPhase {
    #[default]
    Closed,
    Loading,
    Failed {
        message: String,
    },
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UpcomingStatus {
    #[default]
    NotRequested,
    Loading,
    Loaded,
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistRowView {
    /// 1-based position in the checklist.
    pub number: usize,
    pub item_id: String,
    pub text: String,
    pub category: String,
    pub icon: &'static str,
    pub company_specific: bool,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingRowView {
    pub number: usize,
    pub job_id: String,
    pub company_name: String,
    pub position: String,
    pub stage: String,
    pub stage_label: String,
    pub schedule_date: String,
    pub urgency: UrgencyView,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChecklistViewModel {
    pub phase: ViewPhase,
    pub job_id: Option<String>,
    pub stage: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub ai_generated: bool,
    pub rows: Vec<ChecklistRowView>,
    pub summary: ProgressSummary,
    pub saving: bool,
    pub can_retry: bool,
    pub urgency: Option<UrgencyView>,
    pub upcoming: Vec<UpcomingRowView>,
    pub upcoming_status: UpcomingStatus,
    pub dirty: bool,
}

pub(crate) fn checklist_rows(
    checklist: &Checklist,
    progress: &ProgressState,
) -> Vec<ChecklistRowView> {
    checklist
        .items
        .iter()
        .enumerate()
        .map(|(idx, item)| ChecklistRowView {
            number: idx + 1,
            item_id: item.id.clone(),
            text: item.text.clone(),
            category: item.category.clone(),
            icon: category_icon(&item.category),
            company_specific: item.company_specific,
            checked: progress.is_completed(&item.id),
        })
        .collect()
}

pub(crate) fn upcoming_rows(entries: &[UpcomingInterview]) -> Vec<UpcomingRowView> {
    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| UpcomingRowView {
            number: idx + 1,
            job_id: entry.job_id.clone(),
            company_name: entry.company_name.clone(),
            position: entry.position.clone(),
            stage: entry.stage.clone(),
            stage_label: format_stage(&entry.stage),
            schedule_date: entry.schedule_date.clone(),
            urgency: UrgencyView::from_days(entry.days_until),
        })
        .collect()
}
