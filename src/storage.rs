//! Local persistence for the deal store and the last campaign.
//!
//! Everything lives in one `SQLite` file under the storage root:
//!
//! ```text
//! <root>/deals.sqlite
//!   deals       # one row per product, ordered by position
//!   campaigns   # the last generated campaign as JSON
//! ```
//!
//! The hub only talks to persistence through [`DealBackend`], so tests can
//! swap in an in-memory backend and failures stay best-effort.

mod campaign;
mod deals;

use std::path::PathBuf;
use std::{fs, io};

use rusqlite::Connection;

use crate::model::{CampaignOutput, ProductRecord};

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupt data: {0}")]
    Corrupt(String),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// Load-all / replace-all / clear-all over the deal store, plus the most
/// recent campaign.
pub trait DealBackend {
    fn load_deals(&self) -> Result<Vec<ProductRecord>>;
    fn replace_deals(&self, deals: &[ProductRecord]) -> Result<()>;
    fn clear_deals(&self) -> Result<()>;
    fn save_campaign(&self, campaign: &CampaignOutput) -> Result<()>;
    fn load_last_campaign(&self) -> Result<Option<CampaignOutput>>;
}

impl<T: DealBackend + ?Sized> DealBackend for &T {
    fn load_deals(&self) -> Result<Vec<ProductRecord>> {
        (**self).load_deals()
    }

    fn replace_deals(&self, deals: &[ProductRecord]) -> Result<()> {
        (**self).replace_deals(deals)
    }

    fn clear_deals(&self) -> Result<()> {
        (**self).clear_deals()
    }

    fn save_campaign(&self, campaign: &CampaignOutput) -> Result<()> {
        (**self).save_campaign(campaign)
    }

    fn load_last_campaign(&self) -> Result<Option<CampaignOutput>> {
        (**self).load_last_campaign()
    }
}

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS deals (
        asin         TEXT PRIMARY KEY,
        position     INTEGER NOT NULL,
        title        TEXT,
        price        TEXT,
        code         TEXT,
        discount     TEXT,
        image_url    TEXT NOT NULL,
        last_updated TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS campaigns (
        id         TEXT PRIMARY KEY,
        persona    TEXT NOT NULL,
        created_at TEXT NOT NULL,
        output     TEXT NOT NULL
    );
";

/// `SQLite`-backed storage rooted at a directory.
#[derive(Debug)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Creates a new storage instance rooted at the given directory.
    ///
    /// The directory and the schema are created if they don't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let storage = Self { root };
        storage.open_db()?.execute_batch(SCHEMA)?;
        Ok(storage)
    }

    /// Returns the default storage root: `~/.dealhub/`.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".dealhub"))
    }

    fn db_path(&self) -> PathBuf {
        self.root.join("deals.sqlite")
    }

    fn open_db(&self) -> Result<Connection> {
        Ok(Connection::open(self.db_path())?)
    }
}

impl DealBackend for Storage {
    fn load_deals(&self) -> Result<Vec<ProductRecord>> {
        Storage::load_deals(self)
    }

    fn replace_deals(&self, deals: &[ProductRecord]) -> Result<()> {
        Storage::replace_deals(self, deals)
    }

    fn clear_deals(&self) -> Result<()> {
        Storage::clear_deals(self)
    }

    fn save_campaign(&self, campaign: &CampaignOutput) -> Result<()> {
        Storage::save_campaign(self, campaign)
    }

    fn load_last_campaign(&self) -> Result<Option<CampaignOutput>> {
        Storage::load_last_campaign(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn new_creates_root_and_database() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested").join("hub");

        let storage = Storage::new(&root).unwrap();

        assert!(root.is_dir());
        assert!(storage.db_path().is_file());
    }

    #[test]
    fn reopening_keeps_schema() {
        let dir = TempDir::new().unwrap();
        Storage::new(dir.path()).unwrap();
        let storage = Storage::new(dir.path()).unwrap();

        assert!(storage.load_deals().unwrap().is_empty());
    }
}
