//! Process command implementation.

use super::extract::build_extractor;
use super::read_text;
use super::row::{append, record_to_row};
use crate::cli::ProcessArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use orderform_domain::FormattedRow;
use orderform_gatekeeper::ValidationConfig;

/// Execute the process command.
pub async fn execute_process(
    args: ProcessArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let text = read_text(args.file.as_deref(), args.stdin)?;

    let validation = args.preset.map(Into::into).unwrap_or_else(|| config.validation.clone());
    let row = process_text(&text, config, validation).await?;

    println!("{}", formatter.format_row(&row)?);

    if args.append {
        append(&row, config)?;
        eprintln!("{}", formatter.success(&format!("Row appended to {}", config.sheet.path.display())));
    }

    Ok(())
}

/// Text to row: extract (empty form on failure), validate, format.
pub async fn process_text(
    text: &str,
    config: &Config,
    validation: ValidationConfig,
) -> Result<FormattedRow> {
    let extractor = build_extractor(config)?;
    let record = extractor.extract_or_default(text).await;
    record_to_row(&record, validation)
}
