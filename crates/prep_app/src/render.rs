use std::fmt::Write;

use prep_core::{ChecklistViewModel, Palette, UpcomingStatus, ViewPhase};

const BAR_WIDTH: usize = 20;

pub fn render(view: &ChecklistViewModel, palette: &Palette) -> String {
    let mut out = String::new();
    render_upcoming(&mut out, view, palette);
    render_checklist(&mut out, view, palette);
    out
}

fn render_upcoming(out: &mut String, view: &ChecklistViewModel, palette: &Palette) {
    match &view.upcoming_status {
        UpcomingStatus::NotRequested => return,
        UpcomingStatus::Loading => {
            let _ = writeln!(out, "Upcoming interviews: loading...");
            return;
        }
        UpcomingStatus::Failed { message } => {
            let _ = writeln!(
                out,
                "Upcoming interviews unavailable ({message}). Type `upcoming` to retry."
            );
            return;
        }
        UpcomingStatus::Loaded => {}
    }

    if view.upcoming.is_empty() {
        let _ = writeln!(out, "No upcoming interviews.");
        return;
    }

    let _ = writeln!(out, "Upcoming interviews:");
    for row in &view.upcoming {
        let _ = writeln!(
            out,
            "  {:>2}. [{}] {} - {} ({}) {} {}",
            row.number,
            row.urgency.label,
            row.company_name,
            row.position,
            row.stage_label,
            row.schedule_date,
            row.urgency.level.color(palette)
        );
    }
}

fn render_checklist(out: &mut String, view: &ChecklistViewModel, palette: &Palette) {
    let heading = match (&view.stage, &view.company) {
        (Some(stage), Some(company)) => format!("{stage} @ {company}"),
        (Some(stage), None) => stage.clone(),
        _ => String::new(),
    };

    match &view.phase {
        ViewPhase::Closed => return,
        ViewPhase::Loading => {
            let _ = writeln!(out, "Checklist {heading}: loading...");
            return;
        }
        ViewPhase::Failed { message } => {
            let _ = writeln!(out, "Checklist {heading} failed to load: {message}");
            if view.can_retry {
                let _ = writeln!(out, "Type `retry` to try again.");
            }
            return;
        }
        ViewPhase::Ready => {}
    }

    let title = view.title.as_deref().unwrap_or("Interview Prep");
    let _ = write!(out, "{title}");
    if let Some(urgency) = &view.urgency {
        let _ = write!(out, "  [{}] {}", urgency.label, urgency.level.color(palette));
    }
    if view.ai_generated {
        let _ = write!(out, "  (AI)");
    }
    let _ = writeln!(out);

    for row in &view.rows {
        let mark = if row.checked { "x" } else { " " };
        let company = if row.company_specific { " *" } else { "" };
        let _ = writeln!(
            out,
            "  [{mark}] {}. {} <{}>{company}",
            row.number, row.text, row.icon
        );
    }

    let summary = view.summary;
    let filled = if summary.total == 0 {
        0
    } else {
        summary.completed.min(summary.total) * BAR_WIDTH / summary.total
    };
    let _ = writeln!(
        out,
        "  {}{} {}/{} ({}%){}",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        summary.completed,
        summary.total,
        summary.percent,
        if view.saving { "  saving..." } else { "" }
    );
}
