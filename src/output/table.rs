//
//  codeship-client
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Table Output Formatting
//!
//! Utilities for rendering tabular output in the terminal with `comfy_table`,
//! plus the small value formatters the CLI uses inside table cells.
//!
//! ## Example
//!
//! ```rust,ignore
//! use codeship_client::output::TableBuilder;
//!
//! TableBuilder::new()
//!     .headers(["UUID", "Name", "Type"])
//!     .row(["0b7f3a30", "web", "pro"])
//!     .print();
//! ```

use chrono::{DateTime, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

/// Placeholder for missing cell values.
pub const EMPTY_CELL: &str = "-";

/// Creates a table with the CLI's standard preset.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// A builder for tables with optional colored headers.
pub struct TableBuilder {
    table: Table,
    color: bool,
}

impl TableBuilder {
    /// Creates a builder, detecting color support from the terminal.
    pub fn new() -> Self {
        Self {
            table: create_table(),
            color: console::colors_enabled(),
        }
    }

    /// Overrides color detection.
    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Sets the header row. Headers are cyan when color is enabled.
    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if self.color {
            self.table
                .set_header(headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
        } else {
            self.table.set_header(headers);
        }
        self
    }

    /// Appends one row.
    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(Into::into).collect();
        self.table.add_row(row);
        self
    }

    /// Appends several rows.
    pub fn rows<I, R, S>(self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        rows.into_iter().fold(self, |builder, row| builder.row(row))
    }

    /// Prints the table to stdout.
    pub fn print(self) {
        println!("{}", self.table);
    }

    /// Returns the underlying table.
    pub fn build(self) -> Table {
        self.table
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Colors a Codeship build status.
///
/// `success` is green, `testing`/`waiting`/`initiated` are yellow,
/// `error`/`failed`/`infrastructure_failure`/`blocked` are red, and
/// `stopped`/`ignored` are dimmed.
pub fn format_status(status: &str, color: bool) -> String {
    if !color {
        return status.to_string();
    }

    use console::style;
    match status.to_lowercase().as_str() {
        "success" | "successful" => style(status).green().to_string(),
        "testing" | "waiting" | "initiated" | "queued" => style(status).yellow().to_string(),
        "error" | "failed" | "infrastructure_failure" | "blocked" => {
            style(status).red().to_string()
        }
        "stopped" | "ignored" => style(status).dim().to_string(),
        _ => status.to_string(),
    }
}

/// Renders an RFC 3339 timestamp relative to now.
pub fn format_timestamp(ts: &str) -> String {
    format_timestamp_at(ts, Utc::now())
}

/// Renders an RFC 3339 timestamp relative to `now`.
///
/// Unparseable input is returned unchanged.
pub fn format_timestamp_at(ts: &str, now: DateTime<Utc>) -> String {
    let Ok(dt) = DateTime::parse_from_rfc3339(ts) else {
        return ts.to_string();
    };
    let utc: DateTime<Utc> = dt.into();
    let diff = now.signed_duration_since(utc);

    if diff.num_minutes() < 1 {
        "just now".to_string()
    } else if diff.num_minutes() < 60 {
        format!("{} min ago", diff.num_minutes())
    } else if diff.num_hours() < 24 {
        format!("{} hours ago", diff.num_hours())
    } else if diff.num_days() < 7 {
        format!("{} days ago", diff.num_days())
    } else {
        utc.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Elapsed time between two RFC 3339 timestamps, in whole seconds.
pub fn duration_between(start: &str, end: &str) -> Option<u64> {
    let start = DateTime::parse_from_rfc3339(start).ok()?;
    let end = DateTime::parse_from_rfc3339(end).ok()?;
    u64::try_from(end.signed_duration_since(start).num_seconds()).ok()
}

/// Renders a duration in seconds as `42s`, `3m 5s` or `1h 2m`.
pub fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    }
}

/// Shortens `s` to at most `max_len` characters, ending with `...` when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// The value, or [`EMPTY_CELL`] when absent.
pub fn cell(value: Option<&str>) -> String {
    value.unwrap_or(EMPTY_CELL).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ts: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(ts).unwrap().into()
    }

    #[test]
    fn test_format_timestamp_relative() {
        let now = at("2024-03-10T12:00:00Z");
        assert_eq!(format_timestamp_at("2024-03-10T11:59:30Z", now), "just now");
        assert_eq!(format_timestamp_at("2024-03-10T11:15:00Z", now), "45 min ago");
        assert_eq!(format_timestamp_at("2024-03-10T07:00:00Z", now), "5 hours ago");
        assert_eq!(format_timestamp_at("2024-03-08T12:00:00Z", now), "2 days ago");
        assert_eq!(format_timestamp_at("2024-01-02T08:30:00Z", now), "2024-01-02 08:30");
    }

    #[test]
    fn test_format_timestamp_passes_through_garbage() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_duration_between() {
        assert_eq!(
            duration_between("2024-03-10T12:00:00Z", "2024-03-10T12:03:05Z"),
            Some(185)
        );
        assert_eq!(duration_between("2024-03-10T12:00:00Z", "nope"), None);
        assert_eq!(
            duration_between("2024-03-10T12:00:05Z", "2024-03-10T12:00:00Z"),
            None
        );
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(185), "3m 5s");
        assert_eq!(format_duration(3720), "1h 2m");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long commit message", 10), "a long ...");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_format_status_without_color() {
        assert_eq!(format_status("success", false), "success");
        assert_eq!(format_status("infrastructure_failure", false), "infrastructure_failure");
    }

    #[test]
    fn test_table_builder_renders_rows() {
        let rendered = TableBuilder::new()
            .color(false)
            .headers(["UUID", "Name"])
            .rows([["p1", "web"], ["p2", "api"]])
            .build()
            .to_string();

        assert!(rendered.contains("UUID"));
        assert!(rendered.contains("web"));
        assert!(rendered.contains("api"));
    }
}
