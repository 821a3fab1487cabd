//! The reconciled, whole-document record

use crate::record::{
    AddOnModule, BankAccount, BillingTerms, Client, Contact, PlanCatalogEntry, SelectedPlan,
};
use serde::{Deserialize, Serialize};

/// A single record representing the whole order form
///
/// Singleton sections hold at most one value; list sections are the
/// order-preserving concatenation of every chunk's contribution. The JSON
/// shape is the one the record validator and downstream consumers expect:
/// lists default to `[]`, singletons to `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalRecord {
    /// Client profile
    pub client: Option<Client>,
    /// All contacts, in chunk order
    pub contacts: Vec<Contact>,
    /// Bank account
    pub bank_account: Option<BankAccount>,
    /// Billing terms
    pub billing_terms: Option<BillingTerms>,
    /// All plan catalog rows, in chunk order
    pub plan_catalog: Vec<PlanCatalogEntry>,
    /// The selected plan
    pub client_selected_plan: Option<SelectedPlan>,
    /// All add-on modules, in chunk order
    pub add_on_modules: Vec<AddOnModule>,
    /// Free-text notes
    pub additional_notes: Option<String>,
}

impl CanonicalRecord {
    /// An all-empty record: every singleton null, every list empty
    pub fn new() -> Self {
        Self::default()
    }

    /// The record substituted when an extraction job fails outright
    ///
    /// Client and billing terms are present with every field null, so the
    /// result still passes the required-section check and can be formatted.
    pub fn empty_form() -> Self {
        Self {
            client: Some(Client::default()),
            billing_terms: Some(BillingTerms::default()),
            ..Self::default()
        }
    }

    /// First contact of type `DSP`
    pub fn dsp_contact(&self) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.is_dsp())
    }

    /// First plan catalog row with the given employee-range label
    pub fn plan_for_range(&self, label: &str) -> Option<&PlanCatalogEntry> {
        self.plan_catalog
            .iter()
            .find(|p| p.employee_range_label.as_deref() == Some(label))
    }

    /// First add-on module with the given name
    pub fn add_on(&self, name: &str) -> Option<&AddOnModule> {
        self.add_on_modules
            .iter()
            .find(|a| a.module_name.as_deref() == Some(name))
    }
}
