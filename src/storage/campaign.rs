//! Campaign storage: keep the last generated campaign so it can be shown again.

use rusqlite::OptionalExtension;

use crate::model::CampaignOutput;

use super::{Result, Storage};

impl Storage {
    /// Stores a campaign as the last one, dropping any earlier campaign.
    pub fn save_campaign(&self, campaign: &CampaignOutput) -> Result<()> {
        let json = serde_json::to_string(campaign)?;
        let mut conn = self.open_db()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM campaigns", [])?;
        tx.execute(
            "INSERT INTO campaigns (id, persona, created_at, output)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                campaign.id.to_string(),
                campaign.persona.as_str(),
                campaign.created_at.to_string(),
                json,
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Loads the most recently saved campaign, if any.
    pub fn load_last_campaign(&self) -> Result<Option<CampaignOutput>> {
        let conn = self.open_db()?;
        let json: Option<String> = conn
            .query_row(
                "SELECT output FROM campaigns ORDER BY rowid DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;
    use tempfile::TempDir;
    use uuid::Uuid;

    use crate::model::{Persona, TaglineSource};
    use crate::storage::StorageError;

    fn test_storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("hub")).unwrap();
        (dir, storage)
    }

    fn sample_campaign(script: &str, created_at: Timestamp) -> CampaignOutput {
        CampaignOutput {
            id: Uuid::new_v4(),
            persona: Persona::GirlMath,
            created_at,
            video_script: script.into(),
            editing_summary: String::new(),
            csv_content: "Name,RegularPrice,SalePrice,Code,Link".into(),
            products: vec![],
            tagline_source: TaglineSource::Fallback,
            video_prompt: None,
            long_form: None,
        }
    }

    #[test]
    fn load_last_campaign_empty() {
        let (_dir, storage) = test_storage();
        assert!(storage.load_last_campaign().unwrap().is_none());
    }

    #[test]
    fn most_recent_save_wins() {
        let (_dir, storage) = test_storage();
        let first = sample_campaign("first", Timestamp::new(1_000, 0).unwrap());
        let second = sample_campaign("second", Timestamp::new(2_000, 0).unwrap());

        storage.save_campaign(&first).unwrap();
        storage.save_campaign(&second).unwrap();
        assert_eq!(storage.load_last_campaign().unwrap().unwrap(), second);

        // Re-saving moves a campaign back to the top.
        storage.save_campaign(&first).unwrap();
        assert_eq!(storage.load_last_campaign().unwrap().unwrap(), first);
    }

    #[test]
    fn only_the_last_campaign_is_kept() {
        let (_dir, storage) = test_storage();
        storage
            .save_campaign(&sample_campaign("first", Timestamp::new(1_000, 0).unwrap()))
            .unwrap();
        storage
            .save_campaign(&sample_campaign("second", Timestamp::new(2_000, 0).unwrap()))
            .unwrap();

        let conn = storage.open_db().unwrap();
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM campaigns", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn corrupt_campaign_json_is_reported() {
        let (_dir, storage) = test_storage();
        let conn = storage.open_db().unwrap();
        conn.execute(
            "INSERT INTO campaigns (id, persona, created_at, output)
             VALUES ('x', 'girl-math', '2024-01-01T00:00:00Z', '{not json')",
            [],
        )
        .unwrap();

        let err = storage.load_last_campaign().unwrap_err();
        assert!(matches!(err, StorageError::Json(_)));
    }
}
