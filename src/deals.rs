//! The deal store: an ordered set of product records, one per identifier.
//!
//! New products surface at the head; updated products keep their position.

use crate::merge::{self, derive_status};
use crate::model::{Asin, Capture, DealStatus, ProductRecord, ValidationError};

/// Ordered collection of merged product records.
#[derive(Debug, Clone, Default)]
pub struct DealStore {
    records: Vec<ProductRecord>,
}

impl DealStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from persisted records.
    ///
    /// Keeps the first record seen for each identifier and recomputes status,
    /// so a hand-edited or stale backend cannot break the store's invariants.
    pub fn from_records(records: impl IntoIterator<Item = ProductRecord>) -> Self {
        let mut store = Self::new();
        for mut record in records {
            if store.position(&record.asin).is_some() {
                tracing::warn!(asin = %record.asin, "dropping duplicate persisted record");
                continue;
            }
            record.status = derive_status(
                record.title.as_deref(),
                record.price.as_deref(),
                record.code.as_deref(),
                record.discount.as_deref(),
            );
            store.records.push(record);
        }
        store
    }

    /// Merges a capture into the store and returns the resulting record.
    pub fn upsert(&mut self, capture: &Capture) -> &ProductRecord {
        match self.position(&capture.asin) {
            Some(idx) => {
                let merged = merge::merge(Some(&self.records[idx]), capture);
                tracing::debug!(
                    asin = %merged.asin,
                    status = merged.status.as_str(),
                    "updated deal"
                );
                self.records[idx] = merged;
                &self.records[idx]
            }
            None => {
                let created = merge::merge(None, capture);
                tracing::debug!(
                    asin = %created.asin,
                    status = created.status.as_str(),
                    "new deal"
                );
                self.records.insert(0, created);
                &self.records[0]
            }
        }
    }

    /// Removes every record.
    pub fn clear_all(&mut self) {
        self.records.clear();
    }

    /// Records in traversal order.
    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn get(&self, asin: &str) -> Option<&ProductRecord> {
        self.records.iter().find(|r| r.asin.as_str() == asin)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ready_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.status == DealStatus::Ready)
            .count()
    }

    /// Resolves an identifier-based selection, in the order given.
    ///
    /// Repeated identifiers are collapsed. Readiness is not checked here;
    /// the campaign assembler owns that rule.
    pub fn select<S: AsRef<str>>(
        &self,
        ids: &[S],
    ) -> Result<Vec<ProductRecord>, ValidationError> {
        let mut selected: Vec<ProductRecord> = Vec::with_capacity(ids.len());
        for id in ids {
            let asin = Asin::parse(id.as_ref())?;
            if selected.iter().any(|r| r.asin == asin) {
                continue;
            }
            let record = self
                .get(asin.as_str())
                .ok_or_else(|| ValidationError::UnknownProduct(asin.to_string()))?;
            selected.push(record.clone());
        }
        Ok(selected)
    }

    fn position(&self, asin: &Asin) -> Option<usize> {
        self.records.iter().position(|r| &r.asin == asin)
    }
}
