//
//  codeship-client
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Output formatting for the `codeship` CLI:
//!
//! - **Table format**: human-readable output for interactive terminal use
//! - **JSON format**: machine-readable output for scripting (`--json`)
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: the available output formats
//! - [`OutputWriter`]: main entry point for writing formatted output
//! - [`TableOutput`]: single records rendered as `key: value` fields
//! - [`TableRow`]: records rendered as rows of a list table
//!
//! ## Example
//!
//! ```rust,ignore
//! use codeship_client::output::{OutputFormat, OutputWriter};
//!
//! let writer = OutputWriter::new(OutputFormat::Json);
//! writer.write_list(&projects, "No projects found")?;
//! writer.write_success("Build restarted");
//! ```

mod table;

pub use table::*;

use serde::Serialize;

/// Represents the available output formats for CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable tables with optional color support.
    #[default]
    Table,
    /// Pretty-printed JSON for scripting and automation.
    Json,
}

impl OutputFormat {
    /// Picks the format from the global `--json` flag.
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}

/// A unified output writer that handles both output formats.
///
/// # Notes
///
/// Color output is detected from the terminal. Colors are disabled when
/// output is piped or `NO_COLOR` is set.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    /// Creates a writer with the given format.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Writes one record to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Table => value.print_table(self.color),
        }
        Ok(())
    }

    /// Writes a list of records to stdout.
    ///
    /// JSON output is a single array. Table output is one table with a row per
    /// record, or `empty_message` when there are none.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn write_list<T: Serialize + TableRow>(
        &self,
        values: &[T],
        empty_message: &str,
    ) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(values)?),
            OutputFormat::Table if values.is_empty() => self.write_info(empty_message),
            OutputFormat::Table => render_rows(values, self.color).print(),
        }
        Ok(())
    }

    pub fn write_info(&self, msg: &str) {
        println!("{}", msg);
    }

    /// Writes a success message to stdout, prefixed with a checkmark.
    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// A record that renders as a block of `key: value` fields.
pub trait TableOutput {
    /// Prints the record. `color` says whether styling may be applied.
    fn print_table(&self, color: bool);
}

/// A record that renders as one row of a list table.
pub trait TableRow {
    /// Column headers, in the same order as [`row`](TableRow::row).
    fn headers() -> &'static [&'static str];

    /// The record's cells.
    fn row(&self, color: bool) -> Vec<String>;
}

/// Builds the list table for `values`.
pub fn render_rows<T: TableRow>(values: &[T], color: bool) -> TableBuilder {
    TableBuilder::new()
        .color(color)
        .headers(T::headers().iter().copied())
        .rows(values.iter().map(|v| v.row(color)))
}

/// Prints a bold header with a dashed underline.
pub fn print_header(text: &str) {
    use console::style;
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

/// Prints a `key: value` line, dimming the key when color is enabled.
pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, &'static str);

    impl TableRow for Row {
        fn headers() -> &'static [&'static str] {
            &["ID", "NAME"]
        }

        fn row(&self, _color: bool) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    #[test]
    fn test_output_format_from_flag() {
        assert_eq!(OutputFormat::from_json_flag(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_json_flag(false), OutputFormat::Table);
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_render_rows_uses_headers_and_cells() {
        let table = render_rows(&[Row("1", "alpha"), Row("2", "beta")], false)
            .build()
            .to_string();

        assert!(table.contains("NAME"));
        assert!(table.contains("alpha"));
        assert!(table.contains("beta"));
    }
}
