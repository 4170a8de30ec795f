//! Rendering helpers for the `mediacat` command-line client.

use mediacat_core::models::{MediaSummary, StatsReport, SweepReport};
use std::fmt::Write;

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Integer with thousands separators, e.g. `12,345`.
pub fn format_count(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if n < 0 {
        out.insert(0, '-');
    }
    out
}

/// Whether an interactive answer means yes.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

pub fn render_media_table(items: &[MediaSummary]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>8}  {:<30}  {:<20}  {:<24}  {:>10}  {:<16}",
        "ID", "Name", "Collection", "Type", "Size", "Created"
    );
    let _ = writeln!(out, "{}", "-".repeat(118));

    for item in items {
        let _ = writeln!(
            out,
            "{:>8}  {:<30}  {:<20}  {:<24}  {:>10}  {:<16}",
            item.id,
            truncate_string(&item.name, 30),
            truncate_string(&item.collection_name, 20),
            truncate_string(&item.mime_type, 24),
            item.size_formatted,
            item.created_at.format("%Y-%m-%d %H:%M")
        );
    }
    out
}

pub fn render_stats(stats: &StatsReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Overview");
    let _ = writeln!(out, "{:<14} {:>14}", "Total Files", format_count(stats.total_count));
    let _ = writeln!(out, "{:<14} {:>14}", "Total Size", stats.total_size_formatted);

    if !stats.by_collection.is_empty() {
        let _ = writeln!(out, "\nBy Collection");
        let _ = writeln!(out, "{:<30} {:>10} {:>12}", "Collection", "Count", "Size");
        for c in &stats.by_collection {
            let _ = writeln!(
                out,
                "{:<30} {:>10} {:>12}",
                truncate_string(&c.collection_name, 30),
                format_count(c.count),
                c.total_size_formatted
            );
        }
    }

    if !stats.by_mime_type.is_empty() {
        let _ = writeln!(out, "\nBy File Type");
        let _ = writeln!(out, "{:<40} {:>10}", "MIME Type", "Count");
        for m in &stats.by_mime_type {
            let _ = writeln!(
                out,
                "{:<40} {:>10}",
                truncate_string(&m.mime_type, 40),
                format_count(m.count)
            );
        }
    }
    out
}

pub fn render_sweep(report: &SweepReport) -> String {
    let mut out = String::new();
    if report.orphaned_keys.is_empty() {
        let _ = writeln!(out, "No orphaned files found.");
        return out;
    }

    let verb = if report.dry_run {
        "Would remove"
    } else {
        "Removed"
    };
    let listed = if report.dry_run {
        &report.orphaned_keys
    } else {
        &report.removed_keys
    };
    for key in listed {
        let _ = writeln!(out, "{}: {}", verb, key);
    }
    for key in &report.failed_keys {
        let _ = writeln!(out, "Failed to remove: {}", key);
    }
    out
}
