//! The deal hub: the store plus its backend, behind the operations the CLI
//! calls.
//!
//! Memory is the source of truth for a session. The backend is loaded once
//! at open and written after every change; backend failures are logged and
//! never undo or block an in-memory update.

use crate::campaign::{self, CampaignOptions, Picker};
use crate::deals::DealStore;
use crate::generate::TextGenerator;
use crate::model::{CampaignOutput, Capture, Persona, ProductRecord, RawCapture, ValidationError};
use crate::storage::DealBackend;

pub struct DealHub<B> {
    store: DealStore,
    backend: B,
    options: CampaignOptions,
}

impl<B: DealBackend> DealHub<B> {
    /// Opens a hub over `backend`, loading whatever it holds.
    pub fn open(backend: B) -> Self {
        let store = match backend.load_deals() {
            Ok(records) => DealStore::from_records(records),
            Err(e) => {
                tracing::warn!(error = %e, "could not load deals, starting empty");
                DealStore::new()
            }
        };
        tracing::debug!(deals = store.len(), "deal hub opened");
        Self {
            store,
            backend,
            options: CampaignOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CampaignOptions) -> Self {
        self.options = options;
        self
    }

    pub fn deals(&self) -> &[ProductRecord] {
        self.store.records()
    }

    pub fn store(&self) -> &DealStore {
        &self.store
    }

    /// Validates a raw capture and merges it into the store.
    pub fn ingest(&mut self, raw: RawCapture) -> Result<ProductRecord, ValidationError> {
        let capture = Capture::try_from(raw)?;
        let record = self.store.upsert(&capture).clone();
        self.persist_deals();
        Ok(record)
    }

    pub fn clear_all(&mut self) {
        self.store.clear_all();
        if let Err(e) = self.backend.clear_deals() {
            tracing::warn!(error = %e, "could not clear persisted deals");
        }
    }

    /// Generates a campaign for the selected identifiers and keeps it as the
    /// last campaign.
    pub fn generate_campaign<S: AsRef<str>>(
        &self,
        ids: &[S],
        persona: Persona,
        generator: &dyn TextGenerator,
        picker: &mut dyn Picker,
    ) -> Result<CampaignOutput, ValidationError> {
        let records = self.store.select(ids)?;
        let output =
            campaign::generate_campaign(records, persona, generator, picker, &self.options)?;
        if let Err(e) = self.backend.save_campaign(&output) {
            tracing::warn!(error = %e, id = %output.id, "could not save campaign");
        }
        Ok(output)
    }

    /// The most recently saved campaign, if any.
    pub fn last_campaign(&self) -> Option<CampaignOutput> {
        match self.backend.load_last_campaign() {
            Ok(campaign) => campaign,
            Err(e) => {
                tracing::warn!(error = %e, "could not load last campaign");
                None
            }
        }
    }

    fn persist_deals(&self) {
        if let Err(e) = self.backend.replace_deals(self.store.records()) {
            tracing::warn!(error = %e, "could not persist deals");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;

    use crate::campaign::FixedPicker;
    use crate::campaign::tests::MockGenerator;
    use crate::model::DealStatus;
    use crate::storage::{Result as StorageResult, StorageError};

    #[derive(Default)]
    struct MemoryBackend {
        deals: RefCell<Vec<ProductRecord>>,
        campaigns: RefCell<Vec<CampaignOutput>>,
    }

    impl DealBackend for MemoryBackend {
        fn load_deals(&self) -> StorageResult<Vec<ProductRecord>> {
            Ok(self.deals.borrow().clone())
        }

        fn replace_deals(&self, deals: &[ProductRecord]) -> StorageResult<()> {
            *self.deals.borrow_mut() = deals.to_vec();
            Ok(())
        }

        fn clear_deals(&self) -> StorageResult<()> {
            self.deals.borrow_mut().clear();
            Ok(())
        }

        fn save_campaign(&self, campaign: &CampaignOutput) -> StorageResult<()> {
            self.campaigns.borrow_mut().push(campaign.clone());
            Ok(())
        }

        fn load_last_campaign(&self) -> StorageResult<Option<CampaignOutput>> {
            Ok(self.campaigns.borrow().last().cloned())
        }
    }

    struct BrokenBackend;

    fn broken() -> StorageError {
        StorageError::Corrupt("backend offline".into())
    }

    impl DealBackend for BrokenBackend {
        fn load_deals(&self) -> StorageResult<Vec<ProductRecord>> {
            Err(broken())
        }

        fn replace_deals(&self, _deals: &[ProductRecord]) -> StorageResult<()> {
            Err(broken())
        }

        fn clear_deals(&self) -> StorageResult<()> {
            Err(broken())
        }

        fn save_campaign(&self, _campaign: &CampaignOutput) -> StorageResult<()> {
            Err(broken())
        }

        fn load_last_campaign(&self) -> StorageResult<Option<CampaignOutput>> {
            Err(broken())
        }
    }

    fn raw(
        asin: &str,
        title: Option<&str>,
        price: Option<&str>,
        code: Option<&str>,
    ) -> RawCapture {
        RawCapture {
            asin: Some(asin.into()),
            title: title.map(String::from),
            price: price.map(String::from),
            code: code.map(String::from),
            ..RawCapture::default()
        }
    }

    #[test]
    fn ingest_merges_and_persists() {
        let backend = MemoryBackend::default();
        let mut hub = DealHub::open(&backend);

        hub.ingest(raw("A1", None, Some("19.99"), None)).unwrap();
        let record = hub
            .ingest(raw("A1", Some("Widget"), None, Some("SAVE10")))
            .unwrap();

        assert_eq!(record.status, DealStatus::Ready);
        assert_eq!(record.price.as_deref(), Some("19.99"));
        assert_eq!(hub.deals().len(), 1);
        assert_eq!(backend.deals.borrow().as_slice(), hub.deals());
    }

    #[test]
    fn reopening_restores_deals() {
        let backend = MemoryBackend::default();
        {
            let mut hub = DealHub::open(&backend);
            hub.ingest(raw("A1", Some("Widget"), None, None)).unwrap();
            hub.ingest(raw("B2", Some("Gadget"), None, None)).unwrap();
        }
        let hub = DealHub::open(&backend);
        let asins: Vec<&str> = hub.deals().iter().map(|r| r.asin.as_str()).collect();
        assert_eq!(asins, ["B2", "A1"]);
    }

    #[test]
    fn missing_identifier_is_rejected() {
        let backend = MemoryBackend::default();
        let mut hub = DealHub::open(&backend);

        let err = hub.ingest(RawCapture::default()).unwrap_err();
        assert_eq!(err, ValidationError::MissingIdentifier);
        assert!(hub.deals().is_empty());
    }

    #[test]
    fn failing_backend_never_blocks_memory() {
        let mut hub = DealHub::open(BrokenBackend);
        assert!(hub.deals().is_empty());

        hub.ingest(raw("A1", Some("Widget"), Some("40.00"), Some("SAVE")))
            .unwrap();
        assert_eq!(hub.deals().len(), 1);

        let output = hub
            .generate_campaign(
                &["A1"],
                Persona::GirlMath,
                &MockGenerator::failing(),
                &mut FixedPicker::new(&[0]),
            )
            .unwrap();
        assert_eq!(output.products.len(), 1);
        assert!(hub.last_campaign().is_none());

        hub.clear_all();
        assert!(hub.deals().is_empty());
    }

    #[test]
    fn campaign_is_saved_as_last() {
        let backend = MemoryBackend::default();
        let mut hub = DealHub::open(&backend);
        hub.ingest(raw("A1", Some("Widget"), Some("40.00"), Some("SAVE")))
            .unwrap();

        let output = hub
            .generate_campaign(
                &["A1"],
                Persona::LeisureKing,
                &MockGenerator::failing(),
                &mut FixedPicker::new(&[2, 4]),
            )
            .unwrap();

        assert_eq!(hub.last_campaign(), Some(output));
    }

    #[test]
    fn selection_errors_reach_the_caller() {
        let backend = MemoryBackend::default();
        let mut hub = DealHub::open(&backend);
        hub.ingest(raw("A1", Some("Widget"), None, None)).unwrap();
        let generator = MockGenerator::failing();

        let mut picker = FixedPicker::new(&[0]);

        let unknown = hub
            .generate_campaign(&["NOPE"], Persona::GirlMath, &generator, &mut picker)
            .unwrap_err();
        assert_eq!(unknown, ValidationError::UnknownProduct("NOPE".into()));

        let not_ready = hub
            .generate_campaign(&["A1"], Persona::GirlMath, &generator, &mut picker)
            .unwrap_err();
        assert_eq!(not_ready, ValidationError::NotReady("A1".into()));
        assert!(generator.calls.borrow().is_empty());
        assert!(backend.campaigns.borrow().is_empty());
    }

    #[test]
    fn clear_all_empties_memory_and_backend() {
        let backend = MemoryBackend::default();
        let mut hub = DealHub::open(&backend);
        hub.ingest(raw("A1", Some("Widget"), None, None)).unwrap();

        hub.clear_all();

        assert!(hub.deals().is_empty());
        assert!(backend.deals.borrow().is_empty());
    }
}
