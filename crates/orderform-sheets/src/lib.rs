//! Orderform Sheets
//!
//! Renders canonical records into the fixed-column rows of the destination
//! sheet, and appends them.
//!
//! # Examples
//!
//! ```
//! use orderform_domain::traits::SheetAppender;
//! use orderform_domain::CanonicalRecord;
//! use orderform_sheets::{MemorySheet, RowFormatter, ROW_WIDTH};
//!
//! let row = RowFormatter::new().format(&CanonicalRecord::empty_form()).unwrap();
//! assert_eq!(row.len(), ROW_WIDTH);
//!
//! let mut sheet = MemorySheet::new();
//! sheet.append_row(&row).unwrap();
//! ```

#![warn(missing_docs)]

mod appender;
mod error;
pub mod format;
mod row;

pub use appender::{JsonLinesSheet, MemorySheet};
pub use error::{FormatError, SheetError};
pub use row::{RowFormatter, COLUMNS, ROW_WIDTH};
