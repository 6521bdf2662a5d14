use std::collections::BTreeSet;

/// Identifies the (job, stage) pair a progress set belongs to, plus the
/// company the checklist content is tailored for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ChecklistKey {
    pub job_id: String,
    pub stage: String,
    pub company: String,
}

impl ChecklistKey {
    pub fn new(
        job_id: impl Into<String>,
        stage: impl Into<String>,
        company: impl Into<String>,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            stage: stage.into(),
            company: company.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    /// Open-ended tag; unknown values render with the default icon.
    pub category: String,
    pub company_specific: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Checklist {
    pub title: Option<String>,
    pub company: Option<String>,
    pub ai_generated: bool,
    /// Display order; row numbers are derived from it.
    pub items: Vec<ChecklistItem>,
}

impl Checklist {
    pub fn contains(&self, item_id: &str) -> bool {
        self.items.iter().any(|item| item.id == item_id)
    }

    /// Title to show for `stage`, falling back to "<Stage> Prep".
    pub fn display_title(&self, stage: &str) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!("{} Prep", format_stage(stage)),
        }
    }
}

/// Completed item ids for one (job, stage) pair.
///
/// Ids that are not part of the current checklist are kept as-is; they are
/// never rendered as checked and never counted as completed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressState {
    completed_ids: BTreeSet<String>,
}

impl ProgressState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            completed_ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Flips membership of `item_id` and returns the resulting set.
    pub fn toggle(&mut self, item_id: &str) -> &BTreeSet<String> {
        if !self.completed_ids.remove(item_id) {
            self.completed_ids.insert(item_id.to_string());
        }
        &self.completed_ids
    }

    pub fn is_completed(&self, item_id: &str) -> bool {
        self.completed_ids.contains(item_id)
    }

    pub fn completed_ids(&self) -> &BTreeSet<String> {
        &self.completed_ids
    }

    /// Full set in ascending order, as sent to the backend.
    pub fn to_vec(&self) -> Vec<String> {
        self.completed_ids.iter().cloned().collect()
    }

    /// Each completed id counts once, even when the checklist repeats it.
    pub fn summary(&self, checklist: &Checklist) -> ProgressSummary {
        let completed = checklist
            .items
            .iter()
            .map(|item| item.id.as_str())
            .filter(|id| self.completed_ids.contains(*id))
            .collect::<BTreeSet<_>>()
            .len();
        ProgressSummary::new(completed, checklist.items.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressSummary {
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
}

impl ProgressSummary {
    pub fn new(completed: usize, total: usize) -> Self {
        let percent = if total == 0 {
            0
        } else {
            let completed = completed.min(total);
            ((completed * 100 + total / 2) / total) as u8
        };
        Self {
            completed,
            total,
            percent,
        }
    }
}

/// `phone_screen` -> `Phone Screen`.
pub fn format_stage(stage: &str) -> String {
    stage
        .split(['_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
