//! Record validation logic

use crate::{GatekeeperError, ValidationConfig};
use chrono::NaiveDate;
use orderform_domain::{
    CanonicalRecord, TermDate, CONTACT_TYPE_ACCOUNTS_PAYABLE, CONTACT_TYPE_DSP,
    EMPLOYEE_RANGE_LABELS,
};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Result of record validation
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// Whether the record passed validation
    pub status: ValidationStatus,

    /// Rejection reasons (if any)
    pub reasons: Vec<RejectionReason>,
}

impl ValidationResult {
    /// Whether the record was accepted
    pub fn is_accepted(&self) -> bool {
        self.status == ValidationStatus::Accepted
    }

    /// Turn a rejection into an error
    pub fn into_result(self) -> Result<(), GatekeeperError> {
        match self.status {
            ValidationStatus::Accepted => Ok(()),
            ValidationStatus::Rejected => Err(GatekeeperError::Rejected(self.reasons)),
        }
    }
}

/// Validation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValidationStatus {
    /// Record accepted
    Accepted,

    /// Record rejected
    Rejected,
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationStatus::Accepted => f.write_str("Accepted"),
            ValidationStatus::Rejected => f.write_str("Rejected"),
        }
    }
}

/// Reasons for rejection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectionReason {
    /// A section the row formatter needs is null
    MissingSection {
        /// Record field name
        section: &'static str,
    },

    /// Contact type outside the allowed values
    InvalidContactType {
        /// Position in the contact list
        index: usize,
        /// The type found, if any
        value: Option<String>,
    },

    /// More than one contact of the same type
    DuplicateContactType {
        /// The repeated contact type
        contact_type: &'static str,
        /// How many contacts carry it
        count: usize,
    },

    /// Plan catalog label outside the fixed ranges
    InvalidPlanLabel {
        /// Position in the plan catalog
        index: usize,
        /// The label found, if any
        label: Option<String>,
    },

    /// A term date that is not a calendar date
    UnparsedTermDate {
        /// Billing terms field name
        field: &'static str,
        /// The text found
        value: String,
    },

    /// The initial term starts after it ends
    TermDatesOutOfOrder {
        /// Initial term start date
        start: NaiveDate,
        /// Initial term end date
        end: NaiveDate,
    },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::MissingSection { section } => {
                write!(f, "missing required section '{}'", section)
            }
            RejectionReason::InvalidContactType { index, value } => match value {
                Some(value) => write!(f, "contact {} has unknown type '{}'", index, value),
                None => write!(f, "contact {} has no type", index),
            },
            RejectionReason::DuplicateContactType {
                contact_type,
                count,
            } => write!(f, "{} '{}' contacts, expected at most one", count, contact_type),
            RejectionReason::InvalidPlanLabel { index, label } => match label {
                Some(label) => write!(f, "plan {} has unknown range label '{}'", index, label),
                None => write!(f, "plan {} has no range label", index),
            },
            RejectionReason::UnparsedTermDate { field, value } => {
                write!(f, "{} '{}' is not a YYYY-MM-DD date", field, value)
            }
            RejectionReason::TermDatesOutOfOrder { start, end } => {
                write!(f, "initial term starts {} after it ends {}", start, end)
            }
        }
    }
}

/// The Gatekeeper validates records before formatting
#[derive(Debug, Clone)]
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Validate a record against the configured rules
    ///
    /// Every enabled check runs; the record is accepted iff none of them
    /// produced a reason.
    pub fn validate(&self, record: &CanonicalRecord) -> ValidationResult {
        let mut reasons = Vec::new();

        // 1. Required sections
        if self.config.require_sections {
            if record.client.is_none() {
                reasons.push(RejectionReason::MissingSection { section: "client" });
            }
            if record.billing_terms.is_none() {
                reasons.push(RejectionReason::MissingSection {
                    section: "billing_terms",
                });
            }
        }

        // 2. Contact types
        if self.config.validate_contact_types {
            reasons.extend(self.validate_contact_types(record));
        }

        // 3. Contact count
        if self.config.validate_contact_count {
            reasons.extend(self.validate_contact_count(record));
        }

        // 4. Plan labels
        if self.config.validate_plan_labels {
            reasons.extend(self.validate_plan_labels(record));
        }

        // 5. Term dates
        if self.config.validate_term_dates {
            reasons.extend(self.validate_term_dates(record));
        }

        let status = if reasons.is_empty() {
            ValidationStatus::Accepted
        } else {
            ValidationStatus::Rejected
        };

        debug!("Validation {}: {} reasons", status, reasons.len());

        ValidationResult { status, reasons }
    }

    fn validate_contact_types(&self, record: &CanonicalRecord) -> Vec<RejectionReason> {
        record
            .contacts
            .iter()
            .enumerate()
            .filter(|(_, contact)| !contact.is_dsp() && !contact.is_accounts_payable())
            .map(|(index, contact)| RejectionReason::InvalidContactType {
                index,
                value: contact.contact_type.clone(),
            })
            .collect()
    }

    fn validate_contact_count(&self, record: &CanonicalRecord) -> Vec<RejectionReason> {
        let dsp = record.contacts.iter().filter(|c| c.is_dsp()).count();
        let payable = record
            .contacts
            .iter()
            .filter(|c| c.is_accounts_payable())
            .count();

        [(CONTACT_TYPE_DSP, dsp), (CONTACT_TYPE_ACCOUNTS_PAYABLE, payable)]
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(contact_type, count)| RejectionReason::DuplicateContactType {
                contact_type,
                count,
            })
            .collect()
    }

    fn validate_plan_labels(&self, record: &CanonicalRecord) -> Vec<RejectionReason> {
        record
            .plan_catalog
            .iter()
            .enumerate()
            .filter(|(_, plan)| {
                !plan
                    .employee_range_label
                    .as_deref()
                    .is_some_and(|label| EMPLOYEE_RANGE_LABELS.contains(&label))
            })
            .map(|(index, plan)| RejectionReason::InvalidPlanLabel {
                index,
                label: plan.employee_range_label.clone(),
            })
            .collect()
    }

    /// Absent dates pass; present ones must be dates with start ≤ end
    fn validate_term_dates(&self, record: &CanonicalRecord) -> Vec<RejectionReason> {
        let Some(terms) = &record.billing_terms else {
            return Vec::new();
        };

        let mut reasons = Vec::new();
        let fields = [
            ("initial_term_start_date", &terms.initial_term_start_date),
            ("initial_term_end_date", &terms.initial_term_end_date),
        ];
        for (field, value) in fields {
            if let Some(TermDate::Text(text)) = value {
                reasons.push(RejectionReason::UnparsedTermDate {
                    field,
                    value: text.clone(),
                });
            }
        }

        let start = terms.initial_term_start_date.as_ref().and_then(TermDate::as_date);
        let end = terms.initial_term_end_date.as_ref().and_then(TermDate::as_date);
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                reasons.push(RejectionReason::TermDatesOutOfOrder { start, end });
            }
        }

        reasons
    }
}
