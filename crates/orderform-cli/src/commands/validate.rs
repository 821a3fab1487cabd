//! Validate command implementation.

use super::read_record;
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use orderform_gatekeeper::Gatekeeper;

/// Execute the validate command.
///
/// The outcome is always printed; a rejection then fails the command.
pub fn execute_validate(args: ValidateArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let record = read_record(&args.file)?;

    let validation = args.preset.map(Into::into).unwrap_or_else(|| config.validation.clone());
    let result = Gatekeeper::new(validation).validate(&record);

    println!("{}", formatter.format_validation(&result)?);

    result.into_result()?;
    Ok(())
}
