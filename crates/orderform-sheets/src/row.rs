//! Canonical record to sheet row
//!
//! The destination sheet has no header negotiation: position is meaning.
//! [`COLUMNS`] declares that layout, and the formatter builds a
//! `[Cell; ROW_WIDTH]` array literal, so adding or dropping a cell without
//! updating the contract fails to compile.

use crate::error::FormatError;
use crate::format::{date, money, or_else, routing_text, title_case, NA};
use orderform_domain::{
    AddOnModule, CanonicalRecord, Cell, Contact, FormattedRow, PlanCatalogEntry,
    ADD_ON_MODULE_NAMES, EMPLOYEE_RANGE_LABELS,
};

/// Number of columns in the destination sheet
pub const ROW_WIDTH: usize = 48;

/// Column names of the destination sheet, in order
///
/// Placeholder columns the pipeline never fills are named `Blank N`.
pub const COLUMNS: [&str; ROW_WIDTH] = [
    // Dates
    "Initial Term Start",
    "Initial Term End",
    "Service Start",
    // Client
    "FEIN",
    "DSP Email",
    "DSP Name",
    "Account Name",
    // Status
    "Status",
    "Blank 1",
    "Blank 2",
    "Confirmed",
    "Blank 3",
    // Plans
    "01-50 Weekly",
    "01-50 Bi-Weekly",
    "01-50 Implementation Fee",
    "51-100 Weekly",
    "51-100 Bi-Weekly",
    "51-100 Implementation Fee",
    "100+ Weekly",
    "100+ Bi-Weekly",
    "100+ Implementation Fee",
    // Add-ons
    "Benefits Admin Fee",
    "Benefits Admin Units",
    "Benefits Admin Subscription",
    "ACA Reporting Fee",
    "ACA Reporting Units",
    "ACA Reporting Subscription",
    "401(k) Fee",
    "401(k) Units",
    "401(k) Subscription",
    "Garnishments Fee",
    "Garnishments Units",
    "Garnishments Subscription",
    // Contract
    "Initial Term",
    "Renewal Term",
    "Blank 4",
    // Bank
    "Bank Name",
    "Account Type",
    "Routing Number",
    "Account Number",
    "Blank 5",
    // Card
    "Card 1",
    "Card 2",
    "Card 3",
    "Card 4",
    "Card 5",
    "Card 6",
    // Notes
    "Notes",
];

/// Renders a validated canonical record into one sheet row
///
/// Pure: the same record always yields the same row.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowFormatter;

impl RowFormatter {
    /// Create a new row formatter
    pub fn new() -> Self {
        Self
    }

    /// Format a record into a row of exactly [`ROW_WIDTH`] cells
    ///
    /// The record should have passed validation; a null client or billing
    /// terms section is the only failure.
    pub fn format(&self, record: &CanonicalRecord) -> Result<FormattedRow, FormatError> {
        let client = record
            .client
            .as_ref()
            .ok_or(FormatError::MissingSection("client"))?;
        let billing = record
            .billing_terms
            .as_ref()
            .ok_or(FormatError::MissingSection("billing_terms"))?;

        let empty_contact = Contact::default();
        let dsp_contact = record.dsp_contact().unwrap_or(&empty_contact);

        let start_date = date(billing.initial_term_start_date.as_ref());
        let end_date = date(billing.initial_term_end_date.as_ref());

        let [[small_weekly, small_biweekly, small_fee], [mid_weekly, mid_biweekly, mid_fee], [large_weekly, large_biweekly, large_fee]] =
            EMPLOYEE_RANGE_LABELS.map(|label| plan_block(record.plan_for_range(label)));

        let [[benefits_fee, benefits_units, benefits_total], [aca_fee, aca_units, aca_total], [k401_fee, k401_units, k401_total], [garnish_fee, garnish_units, garnish_total]] =
            ADD_ON_MODULE_NAMES.map(|name| add_on_block(record.add_on(name)));

        let bank = record.bank_account.as_ref();
        let dsp_name = text(client.dsp_name.as_deref());

        let cells: [Cell; ROW_WIDTH] = [
            // Dates
            Cell::Text(start_date.clone()),
            Cell::Text(end_date),
            Cell::Text(start_date),
            // Client
            text(client.dsp_fein.as_deref()),
            text(dsp_contact.email.as_deref()),
            dsp_name.clone(),
            dsp_name,
            // Status
            Cell::from("Active"),
            Cell::blank(),
            Cell::blank(),
            Cell::from("Yes"),
            Cell::blank(),
            // Plans
            small_weekly,
            small_biweekly,
            small_fee,
            mid_weekly,
            mid_biweekly,
            mid_fee,
            large_weekly,
            large_biweekly,
            large_fee,
            // Add-ons
            benefits_fee,
            benefits_units,
            benefits_total,
            aca_fee,
            aca_units,
            aca_total,
            k401_fee,
            k401_units,
            k401_total,
            garnish_fee,
            garnish_units,
            garnish_total,
            // Contract
            Cell::Text(
                billing
                    .initial_term_period
                    .as_deref()
                    .map(title_case)
                    .unwrap_or_default(),
            ),
            Cell::Text(
                billing
                    .renewal_term_period
                    .as_deref()
                    .map(|period| format!("Automatic for {}", period))
                    .unwrap_or_default(),
            ),
            Cell::blank(),
            // Bank
            Cell::from(or_else(bank.and_then(|b| b.bank_name.as_deref()), NA)),
            Cell::from(or_else(bank.and_then(|b| b.account_type).map(|t| t.as_str()), NA)),
            Cell::Text(routing_text(bank.and_then(|b| b.routing_number.as_deref()))),
            Cell::from(or_else(bank.and_then(|b| b.account_number.as_deref()), NA)),
            Cell::blank(),
            // Card
            Cell::blank(),
            Cell::blank(),
            Cell::blank(),
            Cell::blank(),
            Cell::blank(),
            Cell::blank(),
            // Notes
            text(record.additional_notes.as_deref()),
        ];

        Ok(FormattedRow::from_cells(cells))
    }
}

/// Text cell, empty when absent
fn text(value: Option<&str>) -> Cell {
    Cell::from(or_else(value, ""))
}

/// `"Base Fee: $x, per check: $y"`, or `"NA"` when both sides are absent
fn rate(base_fee: Option<f64>, per_check: Option<f64>) -> Cell {
    if base_fee.is_none() && per_check.is_none() {
        return Cell::from(NA);
    }
    Cell::Text(format!(
        "Base Fee: {}, per check: {}",
        money(base_fee),
        money(per_check)
    ))
}

/// Weekly rate, bi-weekly rate, one-time implementation fee
fn plan_block(plan: Option<&PlanCatalogEntry>) -> [Cell; 3] {
    match plan {
        Some(plan) => [
            rate(plan.weekly_base_fee, plan.weekly_per_check),
            rate(plan.biweekly_base_fee, plan.biweekly_per_check),
            Cell::Text(money(plan.one_time_implementation_fee)),
        ],
        None => [Cell::from(NA), Cell::from(NA), Cell::from(NA)],
    }
}

/// Fee per unit, raw unit count, yearly subscription
fn add_on_block(add_on: Option<&AddOnModule>) -> [Cell; 3] {
    match add_on {
        Some(add_on) => [
            Cell::Text(format!(
                "{}/{}",
                money(add_on.fee_per_unit),
                or_else(add_on.unit_type.map(|u| u.as_str()), NA)
            )),
            add_on.units.map(Cell::Number).unwrap_or_else(Cell::blank),
            Cell::Text(format!("{} /year", money(add_on.subscription_fee))),
        ],
        None => [Cell::from(NA), Cell::Number(0), Cell::Number(0)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderform_domain::{BillingTerms, Client};

    fn minimal_record() -> CanonicalRecord {
        CanonicalRecord {
            client: Some(Client {
                dsp_name: Some("Acme Logistics".to_string()),
                ..Default::default()
            }),
            billing_terms: Some(BillingTerms::default()),
            ..Default::default()
        }
    }

    fn column(name: &str) -> usize {
        COLUMNS.iter().position(|c| *c == name).unwrap()
    }

    #[test]
    fn test_column_names_are_unique() {
        let mut names = COLUMNS.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ROW_WIDTH);
    }

    #[test]
    fn test_missing_client_is_fatal() {
        let mut record = minimal_record();
        record.client = None;
        assert_eq!(
            RowFormatter::new().format(&record),
            Err(FormatError::MissingSection("client"))
        );
    }

    #[test]
    fn test_missing_billing_terms_is_fatal() {
        let mut record = minimal_record();
        record.billing_terms = None;
        assert_eq!(
            RowFormatter::new().format(&record),
            Err(FormatError::MissingSection("billing_terms"))
        );
    }

    #[test]
    fn test_sparse_record_has_full_width() {
        let row = RowFormatter::new().format(&minimal_record()).unwrap();
        assert_eq!(row.len(), ROW_WIDTH);
        assert_eq!(row.cells()[column("DSP Name")], Cell::from("Acme Logistics"));
        assert_eq!(row.cells()[column("Account Name")], Cell::from("Acme Logistics"));
        assert_eq!(row.cells()[column("DSP Email")], Cell::blank());
        assert_eq!(row.cells()[column("Status")], Cell::from("Active"));
        assert_eq!(row.cells()[column("Confirmed")], Cell::from("Yes"));
    }

    #[test]
    fn test_rate_sides_are_sentineled_independently() {
        assert_eq!(rate(None, None), Cell::from("NA"));
        assert_eq!(
            rate(Some(50.0), None),
            Cell::from("Base Fee: $50.00, per check: NA")
        );
    }

    #[test]
    fn test_missing_add_on_block() {
        assert_eq!(
            add_on_block(None),
            [Cell::from("NA"), Cell::Number(0), Cell::Number(0)]
        );
    }

    #[test]
    fn test_missing_bank_account() {
        let row = RowFormatter::new().format(&minimal_record()).unwrap();
        for name in ["Bank Name", "Account Type", "Routing Number", "Account Number"] {
            assert_eq!(row.cells()[column(name)], Cell::from("NA"), "{}", name);
        }
    }
}
