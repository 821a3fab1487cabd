//! Per-chunk extraction results

use crate::record::{AddOnModule, BankAccount, BillingTerms, Client, Contact, PlanCatalogEntry, SelectedPlan};
use serde::{Deserialize, Serialize};

/// Structured output of one extraction call
///
/// Any field may be absent, since the chunk it was derived from may not
/// contain that information. Unknown keys in the provider output are ignored,
/// and a section or list entry of the wrong shape is dropped on its own
/// without losing the rest of the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialRecord {
    /// Client profile
    #[serde(deserialize_with = "crate::lenient::value")]
    pub client: Option<Client>,
    /// Contacts found in this chunk
    #[serde(deserialize_with = "crate::lenient::entries")]
    pub contacts: Option<Vec<Contact>>,
    /// Bank account
    #[serde(deserialize_with = "crate::lenient::value")]
    pub bank_account: Option<BankAccount>,
    /// Billing terms
    #[serde(deserialize_with = "crate::lenient::value")]
    pub billing_terms: Option<BillingTerms>,
    /// Plan catalog rows found in this chunk
    #[serde(deserialize_with = "crate::lenient::entries")]
    pub plan_catalog: Option<Vec<PlanCatalogEntry>>,
    /// The selected plan
    #[serde(deserialize_with = "crate::lenient::value")]
    pub client_selected_plan: Option<SelectedPlan>,
    /// Add-on modules found in this chunk
    #[serde(deserialize_with = "crate::lenient::entries")]
    pub add_on_modules: Option<Vec<AddOnModule>>,
    /// Free-text notes
    #[serde(deserialize_with = "crate::lenient::text")]
    pub additional_notes: Option<String>,
}

/// Outcome of extracting a single chunk
///
/// Provider output that could not be parsed is not an error: it is carried as
/// [`ChunkRecord::Degraded`] so later chunks can still supply the structure.
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkRecord {
    /// Parsed structured output
    Structured(PartialRecord),
    /// Cleaned provider text that failed to parse
    Degraded(String),
}

impl ChunkRecord {
    /// Whether this chunk failed to parse
    pub fn is_degraded(&self) -> bool {
        matches!(self, ChunkRecord::Degraded(_))
    }

    /// The structured record, if any
    pub fn as_structured(&self) -> Option<&PartialRecord> {
        match self {
            ChunkRecord::Structured(record) => Some(record),
            ChunkRecord::Degraded(_) => None,
        }
    }
}

impl From<PartialRecord> for ChunkRecord {
    fn from(record: PartialRecord) -> Self {
        ChunkRecord::Structured(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_none() {
        let record: PartialRecord = serde_json::from_str(r#"{"client": {"dsp_name": "Acme"}}"#).unwrap();
        assert_eq!(
            record.client.as_ref().and_then(|c| c.dsp_name.as_deref()),
            Some("Acme")
        );
        assert!(record.contacts.is_none());
        assert!(record.additional_notes.is_none());
    }

    #[test]
    fn test_null_lists_are_absent() {
        let record: PartialRecord =
            serde_json::from_str(r#"{"contacts": null, "plan_catalog": []}"#).unwrap();
        assert!(record.contacts.is_none());
        assert_eq!(record.plan_catalog, Some(vec![]));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let record: PartialRecord =
            serde_json::from_str(r#"{"raw_text": "x", "bank_accounts": []}"#).unwrap();
        assert_eq!(record, PartialRecord::default());
    }

    #[test]
    fn test_degraded_has_no_structure() {
        let degraded = ChunkRecord::Degraded("not json".to_string());
        assert!(degraded.is_degraded());
        assert!(degraded.as_structured().is_none());

        let structured = ChunkRecord::from(PartialRecord::default());
        assert!(!structured.is_degraded());
        assert!(structured.as_structured().is_some());
    }

    #[test]
    fn test_off_type_values_keep_the_record() {
        let record: PartialRecord = serde_json::from_str(
            r#"{
                "client": {"dsp_name": "Acme"},
                "contacts": [{"contact_type": "DSP", "postal_code": 98101}, "n/a"],
                "add_on_modules": [{"module_name": "401(k)", "units": 10.0}],
                "bank_account": "see attached"
            }"#,
        )
        .unwrap();

        assert_eq!(
            record.client.and_then(|c| c.dsp_name).as_deref(),
            Some("Acme")
        );
        let contacts = record.contacts.unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].postal_code.as_deref(), Some("98101"));
        assert_eq!(record.add_on_modules.unwrap()[0].units, Some(10));
        assert!(record.bank_account.is_none());
    }
}
