use crate::errors::StorageError;
use crate::models::StoredState;
use std::{env, path::PathBuf};
use tracing::error;

pub trait Store: Send {
    fn load(&self, key: &str) -> Option<StoredState>;
    fn save(&mut self, key: &str, state: &StoredState) -> Result<(), StorageError>;
    fn clear(&mut self, key: &str) -> Result<(), StorageError>;
}

pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = env::var("STREAK_DATA_DIR") {
        return PathBuf::from(dir);
    }

    PathBuf::from("data")
}

// Same rule the exporter uses for download filenames.
pub fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }
}

impl Store for FileStore {
    fn load(&self, key: &str) -> Option<StoredState> {
        let path = self.path_for(key);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                error!("failed to read state file {}: {err}", path.display());
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(stored) => Some(stored),
            Err(err) => {
                error!("failed to parse state file {}: {err}", path.display());
                None
            }
        }
    }

    fn save(&mut self, key: &str, state: &StoredState) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        let payload = serde_json::to_vec_pretty(state)?;
        std::fs::write(self.path_for(key), payload)?;
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: std::sync::Arc<std::sync::Mutex<std::collections::HashMap<String, StoredState>>>,
}

#[cfg(test)]
impl Store for MemoryStore {
    fn load(&self, key: &str) -> Option<StoredState> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn save(&mut self, key: &str, state: &StoredState) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), state.clone());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
