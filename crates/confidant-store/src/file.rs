use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use confidant_model::RecordStore;
use tokio::fs;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::faults::ReadFaults;
use crate::{SnapshotStore, StoreError, StoreResult, snapshot};

/// Snapshot kept in a single JSON file, the system of record shared by every
/// process pointed at the same path.
#[derive(Debug)]
pub struct FileSnapshotStore {
    path: PathBuf,
    read_faults: ReadFaults,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            read_faults: ReadFaults::default(),
        }
    }

    /// Sibling path the document is staged at before being renamed over the
    /// target, so readers never observe a half-written file.
    fn staging_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "snapshot".to_owned());
        self.path
            .with_file_name(format!(".{file_name}.{}.tmp", Uuid::new_v4().simple()))
    }

    async fn ensure_parent(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> RecordStore {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!("no snapshot yet, starting empty");
                return RecordStore::new();
            }
            Err(error) => return self.read_faults.recover(&error),
        };

        match snapshot::decode(&raw) {
            Ok(store) => {
                debug!(count = store.count(), "snapshot loaded");
                store
            }
            Err(error) => self.read_faults.recover(&error),
        }
    }

    #[instrument(skip(self, store), fields(path = %self.path.display(), count = store.count()))]
    async fn save(&self, store: &RecordStore) -> StoreResult<()> {
        let payload = snapshot::encode(store)?;
        self.ensure_parent().await?;

        let staging = self.staging_path();
        if let Err(source) = fs::write(&staging, payload).await {
            let _ = fs::remove_file(&staging).await;
            return Err(StoreError::Write {
                path: staging,
                source,
            });
        }
        if let Err(source) = fs::rename(&staging, &self.path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(StoreError::Write {
                path: self.path.clone(),
                source,
            });
        }

        debug!("snapshot saved");
        Ok(())
    }

    fn read_faults(&self) -> u64 {
        self.read_faults.count()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::Result;
    use confidant_model::{Record, RecordFields, RecordKind, RecordStore};
    use tokio::fs;

    use crate::{FileSnapshotStore, SnapshotStore, StoreError};

    fn unique_test_root(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        std::env::temp_dir().join(format!("{name}-{nanos}"))
    }

    fn carlos() -> Record {
        Record::basic(
            RecordFields::new("Carlos", "10/06/1995").interests(vec!["deportes".to_owned()]),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty_store() -> Result<()> {
        let root = unique_test_root("confidant-missing");
        let store = FileSnapshotStore::new(root.join("contacts.json"));

        assert!(store.load().await.is_empty());
        assert_eq!(store.read_faults(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn saved_record_reloads_in_fresh_instance() -> Result<()> {
        let root = unique_test_root("confidant-roundtrip");
        let path = root.join("contacts.json");

        let mut records = RecordStore::new();
        records.add(carlos());
        FileSnapshotStore::new(&path).save(&records).await?;

        let reloaded = FileSnapshotStore::new(&path).load().await;
        let found = reloaded.find_by_name("Carlos").unwrap();
        assert_eq!(found, &carlos());
        assert_eq!(found.kind(), RecordKind::Basic);
        assert_eq!(found.birthday(), "10/06/1995");
        assert_eq!(found.interests(), ["deportes"]);
        assert_eq!(found.memories().count(), 0);
        assert!(found.anecdotes().is_empty());

        let _ = fs::remove_dir_all(root).await;
        Ok(())
    }

    #[tokio::test]
    async fn save_of_load_reproduces_document() -> Result<()> {
        let root = unique_test_root("confidant-idempotent");
        let path = root.join("contacts.json");
        let store = FileSnapshotStore::new(&path);

        let mut records = RecordStore::new();
        let mut juan = Record::trusted(RecordFields::new("Juan", "15/03/1995"), 8).unwrap();
        juan.append_memory("concierto");
        records.add(carlos());
        records.add(juan);
        store.save(&records).await?;
        let original = fs::read_to_string(&path).await?;

        store.save(&store.load().await).await?;
        let rewritten = fs::read_to_string(&path).await?;
        assert_eq!(original, rewritten);

        let _ = fs::remove_dir_all(root).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_recovers_to_empty_and_counts_fault() -> Result<()> {
        let root = unique_test_root("confidant-corrupt");
        let path = root.join("contacts.json");
        fs::create_dir_all(&root).await?;
        fs::write(&path, "{ not json").await?;

        let store = FileSnapshotStore::new(&path);
        assert!(store.load().await.is_empty());
        assert!(store.load().await.is_empty());
        assert_eq!(store.read_faults(), 2);

        // Recovery does not rewrite the file.
        assert_eq!(fs::read_to_string(&path).await?, "{ not json");

        let _ = fs::remove_dir_all(root).await;
        Ok(())
    }

    #[tokio::test]
    async fn invalid_trust_level_in_file_is_a_read_fault() -> Result<()> {
        let root = unique_test_root("confidant-invalid-level");
        let path = root.join("contacts.json");
        fs::create_dir_all(&root).await?;
        fs::write(
            &path,
            r#"[{"kind":"Trusted","name":"Ana","birthday":"x","interests":[],"memories":[],"anecdotes":[],"trustLevel":0}]"#,
        )
        .await?;

        let store = FileSnapshotStore::new(&path);
        assert!(store.load().await.is_empty());
        assert_eq!(store.read_faults(), 1);

        let _ = fs::remove_dir_all(root).await;
        Ok(())
    }

    #[tokio::test]
    async fn save_creates_missing_parent_directories() -> Result<()> {
        let root = unique_test_root("confidant-nested");
        let path = root.join("a").join("b").join("contacts.json");

        let mut records = RecordStore::new();
        records.add(carlos());
        FileSnapshotStore::new(&path).save(&records).await?;
        assert!(fs::try_exists(&path).await?);

        let _ = fs::remove_dir_all(root).await;
        Ok(())
    }

    #[tokio::test]
    async fn save_failure_propagates_write_error() -> Result<()> {
        let root = unique_test_root("confidant-unwritable");
        fs::create_dir_all(&root).await?;
        // The target path is an existing non-empty directory, so the rename fails.
        let path = root.join("contacts.json");
        fs::create_dir_all(path.join("occupied")).await?;

        let err = FileSnapshotStore::new(&path)
            .save(&RecordStore::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));

        let mut leftovers = fs::read_dir(&root).await?;
        while let Some(entry) = leftovers.next_entry().await? {
            assert!(
                !entry.file_name().to_string_lossy().ends_with(".tmp"),
                "staging file left behind"
            );
        }

        let _ = fs::remove_dir_all(root).await;
        Ok(())
    }
}
