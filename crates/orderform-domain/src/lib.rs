//! Orderform Domain Layer
//!
//! Record types and boundary traits shared by every stage of the order-form
//! pipeline.
//!
//! ## Key Concepts
//!
//! - **PartialRecord**: the structured output of extracting one chunk
//! - **ChunkRecord**: a chunk result, either structured or degraded raw text
//! - **CanonicalRecord**: the single reconciled record for the whole document
//! - **FormattedRow**: a fixed-width row of display cells for the destination sheet
//!
//! ## Architecture
//!
//! ```text
//! RawText → chunks → ChunkRecord* → CanonicalRecord → FormattedRow
//! ```
//!
//! Only serde, serde_json and chrono are pulled in; providers and sheets are reached
//! through the traits in [`traits`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod canonical;
mod lenient;
pub mod partial;
pub mod record;
pub mod row;
pub mod traits;

// Re-exports for convenience
pub use canonical::CanonicalRecord;
pub use partial::{ChunkRecord, PartialRecord};
pub use record::{
    AccountType, AddOnModule, BankAccount, BillingTerms, Client, Contact, FeeFrequency,
    PayrollFrequency, PlanCatalogEntry, SelectedPlan, TermDate, UnitType,
    ADD_ON_MODULE_NAMES, CONTACT_TYPE_ACCOUNTS_PAYABLE, CONTACT_TYPE_DSP,
    EMPLOYEE_RANGE_LABELS,
};
pub use row::{Cell, FormattedRow};
