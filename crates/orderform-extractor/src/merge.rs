//! Reconcile per-chunk records into one canonical record
//!
//! Each canonical field is reconciled by exactly one policy, fixed by the
//! field's slot type:
//!
//! - `Option<T>` slots are **first-wins**: the earliest chunk that supplies a
//!   value sets it, and later chunks never overwrite it. A section object
//!   counts as supplied even when every field in it is null; an empty notes
//!   string does not.
//! - `Vec<T>` slots **concatenate**: every chunk's list is appended in chunk
//!   order, duplicates included.
//!
//! [`FIELD_POLICIES`] is derived from those slot types, so the table always
//! describes what [`ResultMerger`] actually does.

use orderform_domain::{
    AddOnModule, BankAccount, BillingTerms, CanonicalRecord, ChunkRecord, Client, Contact,
    PartialRecord, PlanCatalogEntry, SelectedPlan,
};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// How a canonical field reconciles contributions from successive chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Keep the earliest supplied value
    FirstWins,
    /// Append every chunk's entries in order
    Concatenate,
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergePolicy::FirstWins => f.write_str("first-wins"),
            MergePolicy::Concatenate => f.write_str("concatenate"),
        }
    }
}

/// A canonical slot that can absorb a chunk's contribution
pub trait FieldSlot {
    /// What one chunk contributes to this slot
    type Incoming;

    /// The reconciliation policy this slot implements
    const POLICY: MergePolicy;

    /// Fold one chunk's contribution into the slot
    fn absorb(&mut self, incoming: Self::Incoming);
}

/// First-wins
impl<T> FieldSlot for Option<T> {
    type Incoming = Option<T>;
    const POLICY: MergePolicy = MergePolicy::FirstWins;

    fn absorb(&mut self, incoming: Option<T>) {
        if self.is_none() {
            *self = incoming;
        }
    }
}

/// Concatenate
impl<T> FieldSlot for Vec<T> {
    type Incoming = Option<Vec<T>>;
    const POLICY: MergePolicy = MergePolicy::Concatenate;

    fn absorb(&mut self, incoming: Option<Vec<T>>) {
        if let Some(entries) = incoming {
            self.extend(entries);
        }
    }
}

const fn policy_of<S: FieldSlot>() -> MergePolicy {
    S::POLICY
}

/// The reconciliation policy of every canonical field, in record order
pub const FIELD_POLICIES: [(&str, MergePolicy); 8] = [
    ("client", policy_of::<Option<Client>>()),
    ("contacts", policy_of::<Vec<Contact>>()),
    ("bank_account", policy_of::<Option<BankAccount>>()),
    ("billing_terms", policy_of::<Option<BillingTerms>>()),
    ("plan_catalog", policy_of::<Vec<PlanCatalogEntry>>()),
    ("client_selected_plan", policy_of::<Option<SelectedPlan>>()),
    ("add_on_modules", policy_of::<Vec<AddOnModule>>()),
    ("additional_notes", policy_of::<Option<String>>()),
];

/// Folds chunk records, in chunk order, into a canonical record
#[derive(Debug, Default)]
pub struct ResultMerger {
    canonical: CanonicalRecord,
    absorbed: usize,
    degraded: usize,
}

impl ResultMerger {
    /// Start from an all-empty canonical record
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in the next chunk's record
    ///
    /// Degraded records are counted but contribute nothing.
    pub fn absorb(&mut self, record: ChunkRecord) {
        self.absorbed += 1;
        match record {
            ChunkRecord::Structured(partial) => self.absorb_partial(partial),
            ChunkRecord::Degraded(_) => {
                self.degraded += 1;
                debug!("Chunk {} is degraded, nothing to merge", self.absorbed - 1);
            }
        }
    }

    fn absorb_partial(&mut self, partial: PartialRecord) {
        let PartialRecord {
            client,
            contacts,
            bank_account,
            billing_terms,
            plan_catalog,
            client_selected_plan,
            add_on_modules,
            additional_notes,
        } = partial;

        let canonical = &mut self.canonical;
        canonical.client.absorb(client);
        canonical.contacts.absorb(contacts);
        canonical.bank_account.absorb(bank_account);
        canonical.billing_terms.absorb(billing_terms);
        canonical.plan_catalog.absorb(plan_catalog);
        canonical.client_selected_plan.absorb(client_selected_plan);
        canonical.add_on_modules.absorb(add_on_modules);
        canonical
            .additional_notes
            .absorb(additional_notes.filter(|notes| !notes.is_empty()));
    }

    /// Number of records folded in so far
    pub fn absorbed(&self) -> usize {
        self.absorbed
    }

    /// Number of degraded records folded in so far
    pub fn degraded(&self) -> usize {
        self.degraded
    }

    /// The canonical record
    pub fn finish(self) -> CanonicalRecord {
        self.canonical
    }
}

/// Merge chunk records, in the given order, into one canonical record
///
/// Total over any input; the empty sequence yields an all-empty record.
pub fn merge<I>(records: I) -> CanonicalRecord
where
    I: IntoIterator<Item = ChunkRecord>,
{
    let mut merger = ResultMerger::new();
    for record in records {
        merger.absorb(record);
    }
    merger.finish()
}
