//! Command implementations.

pub mod columns;
pub mod extract;
pub mod process;
pub mod row;
pub mod validate;

pub use self::columns::execute_columns;
pub use self::extract::execute_extract;
pub use self::process::execute_process;
pub use self::row::execute_row;
pub use self::validate::execute_validate;

use crate::error::{CliError, Result};
use orderform_domain::CanonicalRecord;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Read order-form text from a file or stdin.
pub(crate) fn read_text(file: Option<&Path>, stdin: bool) -> Result<String> {
    if stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else if let Some(path) = file {
        Ok(fs::read_to_string(path)?)
    } else {
        Err(CliError::InvalidInput(
            "Must specify either --file or --stdin".to_string(),
        ))
    }
}

/// Read a canonical record JSON file.
pub fn read_record(path: &Path) -> Result<CanonicalRecord> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
