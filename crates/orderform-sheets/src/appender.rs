//! Sheet destinations

use crate::error::SheetError;
use crate::row::ROW_WIDTH;
use orderform_domain::traits::SheetAppender;
use orderform_domain::FormattedRow;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

fn check_width(row: &FormattedRow) -> Result<(), SheetError> {
    if row.len() != ROW_WIDTH {
        return Err(SheetError::WrongWidth {
            expected: ROW_WIDTH,
            found: row.len(),
        });
    }
    Ok(())
}

/// In-memory sheet that collects appended rows
#[derive(Debug, Default)]
pub struct MemorySheet {
    rows: Vec<FormattedRow>,
}

impl MemorySheet {
    /// Create an empty sheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows appended so far, in order
    pub fn rows(&self) -> &[FormattedRow] {
        &self.rows
    }
}

impl SheetAppender for MemorySheet {
    type Error = SheetError;

    fn append_row(&mut self, row: &FormattedRow) -> Result<(), Self::Error> {
        check_width(row)?;
        self.rows.push(row.clone());
        Ok(())
    }
}

/// File-backed sheet storing one JSON array per line
///
/// The file is created on first append; existing rows are never rewritten.
///
/// # Examples
///
/// ```no_run
/// use orderform_sheets::JsonLinesSheet;
///
/// let sheet = JsonLinesSheet::new("orders.jsonl");
/// let rows = sheet.read_rows().unwrap();
/// println!("{} rows", rows.len());
/// ```
#[derive(Debug, Clone)]
pub struct JsonLinesSheet {
    path: PathBuf,
}

impl JsonLinesSheet {
    /// Create a sheet backed by the file at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back every stored row; a missing file is an empty sheet
    pub fn read_rows(&self) -> Result<Vec<FormattedRow>, SheetError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut rows = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            rows.push(serde_json::from_str(&line)?);
        }
        Ok(rows)
    }
}

impl SheetAppender for JsonLinesSheet {
    type Error = SheetError;

    fn append_row(&mut self, row: &FormattedRow) -> Result<(), Self::Error> {
        check_width(row)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let line = serde_json::to_string(row)?;
        debug!("Appending {} byte row", line.len());

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;

        info!("Appended row to {}", self.path.display());
        Ok(())
    }
}
