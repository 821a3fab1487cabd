//! Order-form record sections
//!
//! Every field is optional: a chunk of the source document may simply not
//! mention it. The JSON field names match what the extraction prompt asks the
//! provider to emit.
//! A value of the wrong type is coerced or dropped field by field.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Contact type label for the DSP (client-side) contact
pub const CONTACT_TYPE_DSP: &str = "DSP";

/// Contact type label for the accounts-payable contact
pub const CONTACT_TYPE_ACCOUNTS_PAYABLE: &str = "Accounts Payable";

/// The fixed employee-range labels of the plan catalog, in column order
pub const EMPLOYEE_RANGE_LABELS: [&str; 3] = ["01-50", "51-100", "100+"];

/// The fixed add-on module names, in column order
pub const ADD_ON_MODULE_NAMES: [&str; 4] =
    ["Benefits Admin", "ACA Reporting", "401(k)", "Garnishments"];

/// Client profile (the DSP being onboarded)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    /// Business name
    #[serde(deserialize_with = "crate::lenient::text")]
    pub dsp_name: Option<String>,
    /// Short client code
    #[serde(deserialize_with = "crate::lenient::text")]
    pub dsp_code: Option<String>,
    /// Federal employer identification number, digits only
    #[serde(deserialize_with = "crate::lenient::text")]
    pub dsp_fein: Option<String>,
}

/// A person to contact on the client side
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    /// Either `"DSP"` or `"Accounts Payable"`
    #[serde(deserialize_with = "crate::lenient::text")]
    pub contact_type: Option<String>,
    /// Full name
    #[serde(deserialize_with = "crate::lenient::text")]
    pub name: Option<String>,
    /// Email address
    #[serde(deserialize_with = "crate::lenient::text")]
    pub email: Option<String>,
    /// Phone number as written
    #[serde(deserialize_with = "crate::lenient::text")]
    pub phone: Option<String>,
    /// City
    #[serde(deserialize_with = "crate::lenient::text")]
    pub city: Option<String>,
    /// First address line
    #[serde(deserialize_with = "crate::lenient::text")]
    pub address_line_1: Option<String>,
    /// Second address line
    #[serde(deserialize_with = "crate::lenient::text")]
    pub address_line_2: Option<String>,
    /// Postal code, kept as text to preserve leading zeros
    #[serde(deserialize_with = "crate::lenient::text")]
    pub postal_code: Option<String>,
    /// State or region
    #[serde(deserialize_with = "crate::lenient::text")]
    pub state: Option<String>,
    /// Three-letter country code
    #[serde(deserialize_with = "crate::lenient::text")]
    pub country: Option<String>,
}

impl Contact {
    /// Whether this is the DSP contact
    pub fn is_dsp(&self) -> bool {
        self.contact_type.as_deref() == Some(CONTACT_TYPE_DSP)
    }

    /// Whether this is the accounts-payable contact
    pub fn is_accounts_payable(&self) -> bool {
        self.contact_type.as_deref() == Some(CONTACT_TYPE_ACCOUNTS_PAYABLE)
    }
}

/// Bank account kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    /// Checking account
    Checking,
    /// Savings account
    Savings,
}

impl AccountType {
    /// Display label as it appears in the sheet
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => "Checking",
            AccountType::Savings => "Savings",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bank account used for billing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankAccount {
    /// Bank name
    #[serde(deserialize_with = "crate::lenient::text")]
    pub bank_name: Option<String>,
    /// ABA routing number, kept as text
    #[serde(deserialize_with = "crate::lenient::text")]
    pub routing_number: Option<String>,
    /// Account number, kept as text
    #[serde(deserialize_with = "crate::lenient::text")]
    pub account_number: Option<String>,
    /// Checking or savings
    #[serde(deserialize_with = "crate::lenient::value")]
    pub account_type: Option<AccountType>,
}

/// A contract term date
///
/// ISO `YYYY-MM-DD` strings become [`TermDate::Date`]; anything else the
/// provider produced is kept verbatim as [`TermDate::Text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TermDate {
    /// A parsed calendar date
    Date(NaiveDate),
    /// Unparseable text
    Text(String),
}

impl TermDate {
    /// The calendar date, if this is one
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            TermDate::Date(date) => Some(*date),
            TermDate::Text(_) => None,
        }
    }
}

impl From<NaiveDate> for TermDate {
    fn from(date: NaiveDate) -> Self {
        TermDate::Date(date)
    }
}

/// Contract and billing terms
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingTerms {
    /// Initial term, e.g. `"6 months"`
    #[serde(deserialize_with = "crate::lenient::text")]
    pub initial_term_period: Option<String>,
    /// Renewal term, e.g. `"6 months"`
    #[serde(deserialize_with = "crate::lenient::text")]
    pub renewal_term_period: Option<String>,
    /// How often the client is billed
    #[serde(deserialize_with = "crate::lenient::text")]
    pub billing_frequency: Option<String>,
    /// First day of the initial term
    #[serde(deserialize_with = "crate::lenient::value")]
    pub initial_term_start_date: Option<TermDate>,
    /// Last day of the initial term
    #[serde(deserialize_with = "crate::lenient::value")]
    pub initial_term_end_date: Option<TermDate>,
    /// Headcount estimate
    #[serde(deserialize_with = "crate::lenient::whole")]
    pub estimated_employee_count: Option<i64>,
    /// Estimated subscription total
    #[serde(deserialize_with = "crate::lenient::amount")]
    pub estimated_total_subscription_fee: Option<f64>,
    /// One-time setup fee (distinct from the plan implementation fee)
    #[serde(deserialize_with = "crate::lenient::amount")]
    pub one_time_setup_fee: Option<f64>,
}

/// One row of the plan price catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanCatalogEntry {
    /// Lower employee bound
    #[serde(deserialize_with = "crate::lenient::whole")]
    pub employee_range_min: Option<i64>,
    /// Upper employee bound
    #[serde(deserialize_with = "crate::lenient::whole")]
    pub employee_range_max: Option<i64>,
    /// One of [`EMPLOYEE_RANGE_LABELS`]
    #[serde(deserialize_with = "crate::lenient::text")]
    pub employee_range_label: Option<String>,
    /// One-time implementation fee for this range
    #[serde(deserialize_with = "crate::lenient::amount")]
    pub one_time_implementation_fee: Option<f64>,
    /// Weekly payroll base fee
    #[serde(deserialize_with = "crate::lenient::amount")]
    pub weekly_base_fee: Option<f64>,
    /// Weekly payroll fee per check
    #[serde(deserialize_with = "crate::lenient::amount")]
    pub weekly_per_check: Option<f64>,
    /// Bi-weekly payroll base fee
    #[serde(deserialize_with = "crate::lenient::amount")]
    pub biweekly_base_fee: Option<f64>,
    /// Bi-weekly payroll fee per check
    #[serde(deserialize_with = "crate::lenient::amount")]
    pub biweekly_per_check: Option<f64>,
}

/// Payroll cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayrollFrequency {
    /// Every week
    Weekly,
    /// Every other week
    #[serde(rename = "Bi-Weekly")]
    BiWeekly,
}

/// The plan the client actually selected
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectedPlan {
    /// Weekly or bi-weekly
    #[serde(deserialize_with = "crate::lenient::value")]
    pub payroll_frequency: Option<PayrollFrequency>,
    /// One of [`EMPLOYEE_RANGE_LABELS`]
    #[serde(deserialize_with = "crate::lenient::text")]
    pub selected_employee_range: Option<String>,
    /// Lower employee bound
    #[serde(deserialize_with = "crate::lenient::whole")]
    pub employee_range_min: Option<i64>,
    /// Upper employee bound
    #[serde(deserialize_with = "crate::lenient::whole")]
    pub employee_range_max: Option<i64>,
}

/// What an add-on fee is charged per
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitType {
    /// Per employee, every payroll run
    #[serde(rename = "Per Employee Per Payroll")]
    PerEmployeePerPayroll,
    /// Per employee, yearly
    #[serde(rename = "Per Employee Per Year")]
    PerEmployeePerYear,
    /// Per EIN, monthly
    #[serde(rename = "Per EIN Per Month")]
    PerEinPerMonth,
    /// Per garnishment, every payroll run
    #[serde(rename = "Per Garnishment Per Payroll")]
    PerGarnishmentPerPayroll,
}

impl UnitType {
    /// Display label as it appears in the sheet
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitType::PerEmployeePerPayroll => "Per Employee Per Payroll",
            UnitType::PerEmployeePerYear => "Per Employee Per Year",
            UnitType::PerEinPerMonth => "Per EIN Per Month",
            UnitType::PerGarnishmentPerPayroll => "Per Garnishment Per Payroll",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subscription billing cadence for an add-on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeFrequency {
    /// Billed monthly
    Monthly,
    /// Billed yearly
    Yearly,
}

/// An optional add-on module
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddOnModule {
    /// One of [`ADD_ON_MODULE_NAMES`]
    #[serde(deserialize_with = "crate::lenient::text")]
    pub module_name: Option<String>,
    /// Fee per unit
    #[serde(deserialize_with = "crate::lenient::amount")]
    pub fee_per_unit: Option<f64>,
    /// Unit the fee is charged per
    #[serde(deserialize_with = "crate::lenient::value")]
    pub unit_type: Option<UnitType>,
    /// Number of units
    #[serde(deserialize_with = "crate::lenient::whole")]
    pub units: Option<i64>,
    /// Annualized subscription total
    #[serde(deserialize_with = "crate::lenient::amount")]
    pub subscription_fee: Option<f64>,
    /// Billing cadence of the subscription
    #[serde(deserialize_with = "crate::lenient::value")]
    pub subscription_fee_frequency: Option<FeeFrequency>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_date_parses_iso() {
        let date: TermDate = serde_json::from_str("\"2025-01-05\"").unwrap();
        assert_eq!(date.as_date(), NaiveDate::from_ymd_opt(2025, 1, 5));
    }

    #[test]
    fn test_term_date_keeps_text() {
        let date: TermDate = serde_json::from_str("\"Jan 5th\"").unwrap();
        assert_eq!(date, TermDate::Text("Jan 5th".to_string()));
        assert!(date.as_date().is_none());
    }

    #[test]
    fn test_contact_type_helpers() {
        let contact = Contact {
            contact_type: Some("DSP".to_string()),
            ..Default::default()
        };
        assert!(contact.is_dsp());
        assert!(!contact.is_accounts_payable());
        assert!(!Contact::default().is_dsp());
    }

    #[test]
    fn test_enum_labels_round_trip_through_json() {
        let unit: UnitType = serde_json::from_str("\"Per EIN Per Month\"").unwrap();
        assert_eq!(unit, UnitType::PerEinPerMonth);
        assert_eq!(unit.to_string(), "Per EIN Per Month");

        let freq: PayrollFrequency = serde_json::from_str("\"Bi-Weekly\"").unwrap();
        assert_eq!(freq, PayrollFrequency::BiWeekly);
    }

    #[test]
    fn test_unknown_account_type_drops_only_that_field() {
        let bank: BankAccount =
            serde_json::from_str(r#"{"bank_name": "First Bank", "account_type": "Brokerage"}"#)
                .unwrap();
        assert_eq!(bank.bank_name.as_deref(), Some("First Bank"));
        assert!(bank.account_type.is_none());
    }

    #[test]
    fn test_numeric_identifiers_become_text() {
        let bank: BankAccount =
            serde_json::from_str(r#"{"routing_number": 21000021, "account_number": "000123"}"#)
                .unwrap();
        assert_eq!(bank.routing_number.as_deref(), Some("21000021"));
        assert_eq!(bank.account_number.as_deref(), Some("000123"));
    }

    #[test]
    fn test_term_date_field_tolerates_numbers() {
        let terms: BillingTerms = serde_json::from_str(
            r#"{"initial_term_start_date": 20240201, "initial_term_end_date": "2025-01-31", "estimated_employee_count": "85"}"#,
        )
        .unwrap();
        assert!(terms.initial_term_start_date.is_none());
        assert_eq!(
            terms.initial_term_end_date.and_then(|d| d.as_date()),
            NaiveDate::from_ymd_opt(2025, 1, 31)
        );
        assert_eq!(terms.estimated_employee_count, Some(85));
    }
}
