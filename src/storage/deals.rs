//! Deal storage: load, replace, and clear the persisted deal list.

use jiff::Timestamp;
use rusqlite::Connection;

use crate::merge::derive_status;
use crate::model::{Asin, ProductRecord};

use super::{Result, Storage, StorageError};

impl Storage {
    /// Loads every persisted deal in traversal order.
    ///
    /// Status is recomputed from the stored fields rather than stored.
    pub fn load_deals(&self) -> Result<Vec<ProductRecord>> {
        let conn = self.open_db()?;
        load_deal_rows(&conn)
    }

    /// Replaces the persisted deal list with `deals`, in one transaction.
    pub fn replace_deals(&self, deals: &[ProductRecord]) -> Result<()> {
        let mut conn = self.open_db()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM deals", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO deals
                 (asin, position, title, price, code, discount, image_url, last_updated)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for (position, deal) in deals.iter().enumerate() {
                insert.execute(rusqlite::params![
                    deal.asin.as_str(),
                    i64::try_from(position).unwrap_or(i64::MAX),
                    deal.title,
                    deal.price,
                    deal.code,
                    deal.discount,
                    deal.image_url,
                    deal.last_updated.to_string(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Removes every persisted deal.
    pub fn clear_deals(&self) -> Result<()> {
        let conn = self.open_db()?;
        conn.execute("DELETE FROM deals", [])?;
        Ok(())
    }
}

/// Column values of one `deals` row, before validation.
type DealRow = (
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    String,
    String,
);

fn load_deal_rows(conn: &Connection) -> Result<Vec<ProductRecord>> {
    let mut stmt = conn.prepare(
        "SELECT asin, title, price, code, discount, image_url, last_updated
         FROM deals ORDER BY position",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, Option<String>>(1)?,
            row.get::<_, Option<String>>(2)?,
            row.get::<_, Option<String>>(3)?,
            row.get::<_, Option<String>>(4)?,
            row.get::<_, String>(5)?,
            row.get::<_, String>(6)?,
        ))
    })?;

    let mut deals = Vec::new();
    for row in rows {
        deals.push(deal_from_row(row?)?);
    }
    Ok(deals)
}

fn deal_from_row(row: DealRow) -> Result<ProductRecord> {
    let (asin, title, price, code, discount, image_url, last_updated) = row;
    let asin = Asin::parse(&asin)
        .map_err(|e| StorageError::Corrupt(format!("invalid deal asin: {e}")))?;
    let last_updated = last_updated
        .parse::<Timestamp>()
        .map_err(|e| StorageError::Corrupt(format!("invalid last_updated for {asin}: {e}")))?;
    let status = derive_status(
        title.as_deref(),
        price.as_deref(),
        code.as_deref(),
        discount.as_deref(),
    );

    Ok(ProductRecord {
        asin,
        title,
        price,
        code,
        discount,
        image_url,
        last_updated,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    use crate::deals::DealStore;
    use crate::model::{Capture, DealStatus};

    fn test_storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("hub")).unwrap();
        (dir, storage)
    }

    fn sample_store() -> DealStore {
        let mut store = DealStore::new();
        store.upsert(&Capture {
            asin: Asin::parse("A1").unwrap(),
            title: Some("Widget".into()),
            price: Some("19.99".into()),
            code: Some("SAVE10".into()),
            discount: None,
        });
        store.upsert(&Capture {
            asin: Asin::parse("B2").unwrap(),
            title: None,
            price: Some("5.00".into()),
            code: None,
            discount: None,
        });
        store
    }

    #[test]
    fn replace_and_load_deals() {
        let (_dir, storage) = test_storage();
        let store = sample_store();

        storage.replace_deals(store.records()).unwrap();
        let loaded = storage.load_deals().unwrap();

        assert_eq!(loaded, store.records());
    }

    #[test]
    fn load_deals_empty() {
        let (_dir, storage) = test_storage();
        assert!(storage.load_deals().unwrap().is_empty());
    }

    #[test]
    fn replace_overwrites_previous_list() {
        let (_dir, storage) = test_storage();
        let store = sample_store();
        storage.replace_deals(store.records()).unwrap();

        storage.replace_deals(&store.records()[1..]).unwrap();
        let loaded = storage.load_deals().unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].asin.as_str(), "A1");
    }

    #[test]
    fn clear_deals_removes_everything() {
        let (_dir, storage) = test_storage();
        storage.replace_deals(sample_store().records()).unwrap();

        storage.clear_deals().unwrap();

        assert!(storage.load_deals().unwrap().is_empty());
    }

    #[test]
    fn status_is_recomputed_on_load() {
        let (_dir, storage) = test_storage();
        let store = sample_store();
        storage.replace_deals(store.records()).unwrap();

        let loaded = storage.load_deals().unwrap();
        let statuses: Vec<DealStatus> = loaded.iter().map(|d| d.status).collect();
        assert_eq!(statuses, [DealStatus::Incomplete, DealStatus::Ready]);
    }

    #[test]
    fn corrupt_timestamp_is_reported() {
        let (_dir, storage) = test_storage();
        let conn = storage.open_db().unwrap();
        conn.execute(
            "INSERT INTO deals (asin, position, image_url, last_updated)
             VALUES ('A1', 0, 'x', 'yesterday')",
            [],
        )
        .unwrap();

        let err = storage.load_deals().unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }
}
