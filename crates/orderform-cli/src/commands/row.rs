//! Row command implementation.

use super::read_record;
use crate::cli::RowArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use orderform_domain::traits::SheetAppender;
use orderform_domain::{CanonicalRecord, FormattedRow};
use orderform_gatekeeper::{Gatekeeper, ValidationConfig};
use orderform_sheets::{JsonLinesSheet, RowFormatter};
use tracing::info;

/// Execute the row command.
pub fn execute_row(args: RowArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let record = read_record(&args.file)?;

    let validation = args.preset.map(Into::into).unwrap_or_else(|| config.validation.clone());
    let row = record_to_row(&record, validation)?;

    println!("{}", formatter.format_row(&row)?);

    if args.append {
        append(&row, config)?;
        eprintln!("{}", formatter.success(&format!("Row appended to {}", config.sheet.path.display())));
    }

    Ok(())
}

/// Validate a record, then format it.
pub fn record_to_row(record: &CanonicalRecord, validation: ValidationConfig) -> Result<FormattedRow> {
    let result = Gatekeeper::new(validation).validate(record);
    info!("Validation: {} ({} reasons)", result.status, result.reasons.len());
    result.into_result()?;

    Ok(RowFormatter::new().format(record)?)
}

/// Append a row to the configured sheet.
pub fn append(row: &FormattedRow, config: &Config) -> Result<()> {
    let mut sheet = JsonLinesSheet::new(&config.sheet.path);
    sheet.append_row(row)?;
    Ok(())
}
