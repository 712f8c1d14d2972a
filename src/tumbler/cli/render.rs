use colored::Colorize;
use std::fmt::Write as _;
use std::path::Path;
use tumbler::api::RunOutcome;
use tumbler::combinator::PlanSummary;
use tumbler::inventory::Inventory;
use tumbler::model::Category;

/// Pre-flight counts, one category per line followed by the total.
pub(super) fn render_plan(summary: &PlanSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({} chambers)",
        summary.inventory.bold(),
        summary.lock_size
    );
    for category in Category::ALL {
        let count = summary.arrangements.get(&category).copied().unwrap_or(0);
        let _ = writeln!(out, "  {:<13}{} arrangements", category.label(), count);
    }
    let _ = writeln!(out, "  {:<13}{}", "locks:", summary.total.to_string().bold());
    out
}

pub(super) fn render_inventory(inventory: &Inventory) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", inventory.source_name().bold());
    for category in Category::ALL {
        let parts: Vec<String> = inventory
            .parts(category)
            .iter()
            .map(|p| p.to_string())
            .collect();
        let _ = writeln!(
            out,
            "  {:<13}{} parts ({})",
            category.label(),
            inventory.total(category),
            parts.join(", ")
        );
    }
    out
}

pub(super) fn render_outcome(outcome: &RunOutcome) -> String {
    match outcome {
        RunOutcome::Completed { locks, files } if files.is_empty() => {
            format!("Done: {} locks", locks).green().to_string()
        }
        RunOutcome::Completed { locks, files } => format!(
            "{}\n{}",
            format!("Done: {} locks in {} files", locks, files.len()).green(),
            list_files(files)
        ),
        RunOutcome::Interrupted { locks, files } => {
            let mut out = format!("Stopped by user after {} locks", locks)
                .yellow()
                .to_string();
            if !files.is_empty() {
                out.push('\n');
                out.push_str(&list_files(files));
            }
            out
        }
    }
}

fn list_files<P: AsRef<Path>>(files: &[P]) -> String {
    files
        .iter()
        .map(|f| format!("  {}", f.as_ref().display()))
        .collect::<Vec<_>>()
        .join("\n")
}
