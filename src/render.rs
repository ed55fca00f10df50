use chrono::DateTime;
use colored::*;
use std::fmt;

use crate::viewer::{RankedRow, ViewState, Viewer};

/// Group digits in threes with `,`: 1234567 -> "1,234,567"
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Show an ISO 8601 timestamp as a calendar date, or as-is if it does not parse
pub fn format_updated(updated_at: &str) -> String {
    DateTime::parse_from_rfc3339(updated_at)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| updated_at.to_string())
}

/// Terminal view of a [`Viewer`]'s current state
pub struct RankingView<'a>(pub &'a Viewer);

impl fmt::Display for RankingView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let viewer = self.0;

        writeln!(f, "{}", "Frontend Projects Star Ranking".bold().green())?;
        let filter = viewer
            .selected_category
            .map(|c| c.label())
            .unwrap_or("All");
        writeln!(f, "{} {}", "Category:".dimmed(), filter)?;
        writeln!(f, "{}", "=".repeat(50).dimmed())?;

        match viewer.view_state() {
            ViewState::Loading => writeln!(f, "Loading..."),
            ViewState::Error(message) => {
                writeln!(f, "{}", "Failed to load repositories".red().bold())?;
                writeln!(f, "{}", message.red())
            }
            ViewState::Empty => writeln!(f, "{}", "No repositories in this category".yellow()),
            ViewState::Ranked(rows) => rows.iter().try_for_each(|row| write_row(f, row)),
        }
    }
}

/// Render the viewer's current state as terminal text
pub fn render(viewer: &Viewer) -> String {
    RankingView(viewer).to_string()
}

fn write_row(f: &mut fmt::Formatter<'_>, row: &RankedRow<'_>) -> fmt::Result {
    let repo = row.repo;
    writeln!(
        f,
        "{:>3}  {} {}  [{}]  {} {}",
        format!("#{}", row.rank).dimmed(),
        repo.name.blue().bold(),
        format!("by {}", repo.owner.login).dimmed(),
        repo.category.label().cyan(),
        "★".yellow(),
        format_count(repo.stars).yellow().bold(),
    )?;
    writeln!(f, "     {}", repo.url.underline())?;
    if !repo.owner.avatar_url.is_empty() {
        writeln!(f, "     {} {}", "avatar:".dimmed(), repo.owner.avatar_url.dimmed())?;
    }
    if let Some(deficit) = &row.deficit {
        writeln!(f, "     {}", deficit.to_string().red())?;
    }
    if let Some(description) = &repo.description {
        writeln!(f, "     {}", description)?;
    }
    writeln!(
        f,
        "     {} {}  {} {}",
        "Language:".dimmed(),
        repo.language.as_deref().unwrap_or("-"),
        "Updated:".dimmed(),
        format_updated(&repo.updated_at),
    )
}
