//! Columns command implementation.

use crate::error::Result;
use crate::output::Formatter;

/// Execute the columns command.
pub fn execute_columns(formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_columns()?);
    Ok(())
}
