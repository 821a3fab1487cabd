//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use orderform_domain::{CanonicalRecord, FormattedRow};
use orderform_extractor::ExtractionResult;
use orderform_gatekeeper::{ValidationResult, ValidationStatus};
use orderform_sheets::COLUMNS;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an extraction result.
    pub fn format_extraction(&self, result: &ExtractionResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Table => {
                let meta = &result.metadata;
                let mut out = self.record_table(&result.record);
                out.push('\n');
                out.push_str(&self.info(&format!(
                    "Job {}: {} chunk(s), {} degraded, model {}, {}ms",
                    meta.job_id,
                    meta.chunk_count,
                    meta.degraded_count,
                    meta.model_name,
                    meta.processing_time_ms
                )));
                for chunk in &result.degraded {
                    out.push('\n');
                    out.push_str(&self.warning(&format!(
                        "Chunk {} degraded: {}",
                        chunk.index,
                        preview(&chunk.raw_text)
                    )));
                }
                Ok(out)
            }
            OutputFormat::Quiet => Ok(result.metadata.job_id.to_string()),
        }
    }

    /// Format a canonical record.
    pub fn format_record(&self, record: &CanonicalRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
            OutputFormat::Table => Ok(self.record_table(record)),
            OutputFormat::Quiet => Ok(record
                .client
                .as_ref()
                .and_then(|c| c.dsp_name.clone())
                .unwrap_or_default()),
        }
    }

    /// Format a validation outcome.
    pub fn format_validation(&self, result: &ValidationResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Table => {
                let mut lines = vec![match result.status {
                    ValidationStatus::Accepted => self.success("Record accepted"),
                    ValidationStatus::Rejected => self.error("Record rejected"),
                }];
                lines.extend(result.reasons.iter().map(|r| format!("  - {}", r)));
                Ok(lines.join("\n"))
            }
            OutputFormat::Quiet => Ok(result.status.to_string()),
        }
    }

    /// Format a sheet row.
    pub fn format_row(&self, row: &FormattedRow) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string(row)?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["#", "Column", "Value"]);
                for (idx, (name, cell)) in COLUMNS.iter().zip(row.cells()).enumerate() {
                    builder.push_record([idx.to_string(), name.to_string(), cell.to_string()]);
                }
                Ok(self.render(builder))
            }
            OutputFormat::Quiet => Ok(row.to_tsv()),
        }
    }

    /// Format the column layout.
    pub fn format_columns(&self) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&COLUMNS[..])?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["#", "Column"]);
                for (idx, name) in COLUMNS.iter().enumerate() {
                    builder.push_record([idx.to_string(), name.to_string()]);
                }
                Ok(self.render(builder))
            }
            OutputFormat::Quiet => Ok(COLUMNS.join("\n")),
        }
    }

    fn record_table(&self, record: &CanonicalRecord) -> String {
        let client = record.client.as_ref();
        let terms = record.billing_terms.as_ref();

        let mut builder = Builder::default();
        builder.push_record(["Section", "Value"]);
        builder.push_record([
            "Client".to_string(),
            client
                .and_then(|c| c.dsp_name.clone())
                .unwrap_or_else(|| "-".to_string()),
        ]);
        builder.push_record([
            "FEIN".to_string(),
            client
                .and_then(|c| c.dsp_fein.clone())
                .unwrap_or_else(|| "-".to_string()),
        ]);
        builder.push_record([
            "Contacts".to_string(),
            record
                .contacts
                .iter()
                .map(|c| {
                    format!(
                        "{} <{}>",
                        c.contact_type.as_deref().unwrap_or("?"),
                        c.email.as_deref().unwrap_or("")
                    )
                })
                .collect::<Vec<_>>()
                .join(", "),
        ]);
        builder.push_record([
            "Bank".to_string(),
            record
                .bank_account
                .as_ref()
                .and_then(|b| b.bank_name.clone())
                .unwrap_or_else(|| "-".to_string()),
        ]);
        builder.push_record([
            "Initial term".to_string(),
            terms
                .and_then(|t| t.initial_term_period.clone())
                .unwrap_or_else(|| "-".to_string()),
        ]);
        builder.push_record([
            "Plans".to_string(),
            record
                .plan_catalog
                .iter()
                .filter_map(|p| p.employee_range_label.as_deref())
                .collect::<Vec<_>>()
                .join(", "),
        ]);
        builder.push_record([
            "Add-ons".to_string(),
            record
                .add_on_modules
                .iter()
                .filter_map(|a| a.module_name.as_deref())
                .collect::<Vec<_>>()
                .join(", "),
        ]);
        builder.push_record([
            "Notes".to_string(),
            record
                .additional_notes
                .as_deref()
                .map(preview)
                .unwrap_or_else(|| "-".to_string()),
        ]);

        self.render(builder)
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// First line of `text`, cut to 60 characters.
fn preview(text: &str) -> String {
    let line = text.lines().next().unwrap_or("");
    if line.chars().count() > 60 {
        format!("{}...", line.chars().take(60).collect::<String>())
    } else {
        line.to_string()
    }
}
