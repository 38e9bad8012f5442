//! Output formatting utilities for CLI commands.

use serde::Serialize;
use std::io::Write;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::CliError;

/// Types that can be printed as text or JSON.
pub trait FormattedOutput: Serialize {
    fn format_text(&self) -> String;

    fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Print formatted output to stdout.
pub fn print_output<T: FormattedOutput>(ctx: &CommandContext, value: &T) -> Result<(), CliError> {
    write_output(ctx.format, value, std::io::stdout().lock())
}

/// Print formatted output to a writer.
pub fn write_output<T, W>(format: OutputFormat, value: &T, mut writer: W) -> Result<(), CliError>
where
    T: FormattedOutput,
    W: Write,
{
    let output = match format {
        OutputFormat::Text => value.format_text(),
        OutputFormat::Json => value.format_json()?,
    };
    writeln!(writer, "{output}")?;
    Ok(())
}

/// Success/error status line.
#[derive(Debug, Serialize)]
pub struct StatusOutput {
    pub status: String,
    pub message: String,
}

impl StatusOutput {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }
}

impl FormattedOutput for StatusOutput {
    fn format_text(&self) -> String {
        match self.status.as_str() {
            "success" => format!("✓ {}", self.message),
            _ => format!("{}: {}", self.status, self.message),
        }
    }
}

/// Render rows as aligned columns under a header row.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let render = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![render(headers.to_vec())];
    lines.extend(
        rows.iter()
            .map(|row| render(row.iter().map(String::as_str).collect())),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_and_json() {
        let status = StatusOutput::success("Assumed role Developer");
        let mut text = Vec::new();
        write_output(OutputFormat::Text, &status, &mut text).unwrap();
        assert_eq!(String::from_utf8(text).unwrap(), "✓ Assumed role Developer\n");

        let mut json = Vec::new();
        write_output(OutputFormat::Json, &status, &mut json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["status"], "success");
    }

    #[test]
    fn table_aligns_columns() {
        let rendered = table(
            &["ID", "NAME"],
            &[
                vec!["admin".to_string(), "Administrator".to_string()],
                vec!["readonly".to_string(), "ReadOnly".to_string()],
            ],
        );
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "ID        NAME");
        assert_eq!(lines[1], "admin     Administrator");
        assert_eq!(lines[2], "readonly  ReadOnly");
    }
}
