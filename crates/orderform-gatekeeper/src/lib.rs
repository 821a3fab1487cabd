//! Orderform Gatekeeper
//!
//! Checks a canonical record against the field contract before it is
//! formatted into a sheet row.
//!
//! The Gatekeeper provides:
//! - Required-section checks (client, billing terms)
//! - Enumeration checks (contact types, plan range labels)
//! - Contact count checks
//! - Term date checks
//!
//! # Examples
//!
//! ```
//! use orderform_domain::CanonicalRecord;
//! use orderform_gatekeeper::{Gatekeeper, ValidationStatus};
//!
//! let gatekeeper = Gatekeeper::default_config();
//!
//! let result = gatekeeper.validate(&CanonicalRecord::empty_form());
//! assert_eq!(result.status, ValidationStatus::Accepted);
//!
//! let result = gatekeeper.validate(&CanonicalRecord::new());
//! assert_eq!(result.status, ValidationStatus::Rejected);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod validator;

pub use config::ValidationConfig;
pub use error::GatekeeperError;
pub use validator::{Gatekeeper, RejectionReason, ValidationResult, ValidationStatus};
