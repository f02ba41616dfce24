//! Blueprint Store — named example-sets persisted one JSON file per record.
//!
//! Records live under a configured directory as `<id>.json`, pretty-printed
//! for human inspection. There is no index and no file locking: concurrent
//! creates get distinct ids and are safe; concurrent writes to the *same* id
//! (two `record_usage` calls racing) last-write-win. That race is accepted
//! under the single-writer assumption of this tool.

pub mod handlers;

use std::path::PathBuf;

use chrono::Utc;
use thiserror::Error;
use tracing::warn;

use crate::models::blueprint::Blueprint;
use crate::models::document::ParsedDocument;

#[derive(Debug, Error)]
pub enum BlueprintStoreError {
    #[error("Blueprint '{id}' not found")]
    NotFound { id: String },

    #[error("No complaint examples uploaded")]
    EmptyExamples,

    #[error("Blueprint record '{id}' is not valid JSON: {source}")]
    Corrupt {
        id: String,
        source: serde_json::Error,
    },

    #[error("Blueprint storage error: {0}")]
    Storage(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct BlueprintStore {
    dir: PathBuf,
}

impl BlueprintStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Promotes a batch of examples into a new persisted record.
    ///
    /// The id is the creation timestamp at second granularity; a `-N` suffix
    /// disambiguates the rare case of two creates landing in the same second.
    pub async fn create(
        &self,
        name: &str,
        custom_instructions: Option<String>,
        examples: Vec<ParsedDocument>,
    ) -> Result<Blueprint, BlueprintStoreError> {
        if examples.is_empty() {
            return Err(BlueprintStoreError::EmptyExamples);
        }

        let created_date = Utc::now();
        let id = self
            .unique_id(&created_date.format("%Y%m%d%H%M%S").to_string())
            .await?;

        let blueprint = Blueprint {
            id,
            name: name.to_string(),
            created_date,
            custom_instructions: custom_instructions.filter(|s| !s.trim().is_empty()),
            examples,
            usage_count: 0,
        };
        self.persist(&blueprint).await?;
        Ok(blueprint)
    }

    /// Every persisted record, unordered. Unreadable records are skipped with
    /// a warning rather than failing the whole listing.
    pub async fn list(&self) -> Result<Vec<Blueprint>, BlueprintStoreError> {
        let mut blueprints = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            // Directory not created yet means no records.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(blueprints),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let raw = tokio::fs::read_to_string(&path).await?;
            match serde_json::from_str::<Blueprint>(&raw) {
                Ok(blueprint) => blueprints.push(blueprint),
                Err(e) => warn!("Skipping unreadable blueprint record {:?}: {e}", path),
            }
        }

        Ok(blueprints)
    }

    pub async fn get(&self, id: &str) -> Result<Blueprint, BlueprintStoreError> {
        let path = self.record_path(id)?;
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BlueprintStoreError::NotFound { id: id.to_string() })
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&raw).map_err(|source| BlueprintStoreError::Corrupt {
            id: id.to_string(),
            source,
        })
    }

    /// Removes the record; reports not-found idempotently.
    pub async fn delete(&self, id: &str) -> Result<(), BlueprintStoreError> {
        let path = self.record_path(id)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(BlueprintStoreError::NotFound { id: id.to_string() })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Load, increment `usage_count`, re-persist. Not atomic across callers;
    /// see the module doc for the accepted race.
    pub async fn record_usage(&self, id: &str) -> Result<Blueprint, BlueprintStoreError> {
        let mut blueprint = self.get(id).await?;
        blueprint.usage_count += 1;
        self.persist(&blueprint).await?;
        Ok(blueprint)
    }

    async fn persist(&self, blueprint: &Blueprint) -> Result<(), BlueprintStoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.record_path(&blueprint.id)?;
        let mut body = serde_json::to_string_pretty(blueprint).map_err(|source| {
            BlueprintStoreError::Corrupt {
                id: blueprint.id.clone(),
                source,
            }
        })?;
        body.push('\n');
        tokio::fs::write(&path, body).await?;
        Ok(())
    }

    async fn unique_id(&self, base: &str) -> Result<String, BlueprintStoreError> {
        for counter in 1usize..=999 {
            let candidate = if counter == 1 {
                base.to_string()
            } else {
                format!("{base}-{counter}")
            };
            if !tokio::fs::try_exists(self.record_path(&candidate)?).await? {
                return Ok(candidate);
            }
        }
        Err(BlueprintStoreError::Storage(std::io::Error::other(
            "failed to allocate a unique blueprint id",
        )))
    }

    /// Ids are generated timestamps, so anything outside `[0-9A-Za-z-]` is a
    /// crafted path and treated as not-found rather than touching the fs.
    fn record_path(&self, id: &str) -> Result<PathBuf, BlueprintStoreError> {
        let valid =
            !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(BlueprintStoreError::NotFound { id: id.to_string() });
        }
        Ok(self.dir.join(format!("{id}.json")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, BlueprintStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = BlueprintStore::new(dir.path());
        (dir, store)
    }

    fn examples() -> Vec<ParsedDocument> {
        vec![
            ParsedDocument::new("smith-v-jones.txt", "COMPLAINT FOR DAMAGES ..."),
            ParsedDocument::new("doe-v-roe.docx", "PLAINTIFF ALLEGES ..."),
        ]
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let (_dir, store) = store();
        let created = store
            .create("MVA standard", Some("Short prayer.".to_string()), examples())
            .await
            .unwrap();

        assert_eq!(created.usage_count, 0);
        let loaded = store.get(&created.id).await.unwrap();
        assert_eq!(loaded.name, "MVA standard");
        assert_eq!(loaded.examples.len(), 2);
        assert_eq!(loaded.custom_instructions.as_deref(), Some("Short prayer."));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_example_batch() {
        let (_dir, store) = store();
        let err = store.create("empty", None, Vec::new()).await.unwrap_err();
        assert!(matches!(err, BlueprintStoreError::EmptyExamples));
    }

    #[tokio::test]
    async fn test_blank_custom_instructions_collapse_to_none() {
        let (_dir, store) = store();
        let created = store
            .create("plain", Some("   ".to_string()), examples())
            .await
            .unwrap();
        assert_eq!(created.custom_instructions, None);
    }

    #[tokio::test]
    async fn test_same_second_creates_get_distinct_ids() {
        let (_dir, store) = store();
        let first = store.create("a", None, examples()).await.unwrap();
        let second = store.create("b", None, examples()).await.unwrap();
        let third = store.create("c", None, examples()).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_ne!(second.id, third.id);
        assert_eq!(store.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_list_skips_corrupt_records() {
        let (dir, store) = store();
        store.create("good", None, examples()).await.unwrap();
        std::fs::write(dir.path().join("20200101000000.json"), "{not json").unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "good");
    }

    #[tokio::test]
    async fn test_list_on_missing_directory_is_empty() {
        let store = BlueprintStore::new("/nonexistent/draftsmith-test-blueprints");
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_idempotently_not_found() {
        let (_dir, store) = store();
        let created = store.create("gone", None, examples()).await.unwrap();

        store.delete(&created.id).await.unwrap();
        let err = store.delete(&created.id).await.unwrap_err();
        assert!(matches!(err, BlueprintStoreError::NotFound { .. }));
        let err = store.get(&created.id).await.unwrap_err();
        assert!(matches!(err, BlueprintStoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_record_usage_increments_and_persists() {
        let (_dir, store) = store();
        let created = store.create("counted", None, examples()).await.unwrap();

        let updated = store.record_usage(&created.id).await.unwrap();
        assert_eq!(updated.usage_count, 1);

        // Re-load from disk to confirm it was re-persisted, not just mutated.
        let loaded = store.get(&created.id).await.unwrap();
        assert_eq!(loaded.usage_count, 1);
    }

    #[tokio::test]
    async fn test_crafted_ids_never_touch_the_filesystem() {
        let (_dir, store) = store();
        for id in ["../escape", "a/b", "", "id.json"] {
            let err = store.get(id).await.unwrap_err();
            assert!(matches!(err, BlueprintStoreError::NotFound { .. }), "id: {id}");
        }
    }
}
