use crate::errors::AppError;
use std::collections::BTreeMap;
use std::{env, path::PathBuf, sync::Arc};
use tokio::{fs, sync::Mutex};
use tracing::error;

pub const LOGS_KEY: &str = "gymProgressLogs";
pub const AUTH_KEY: &str = "gymAuth";

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/tracker.json"))
}

// String-valued slots persisted together in one JSON file. Clones share the
// same slot map, so every component constructed with a handle sees the same
// storage, and each write goes to disk before the call returns.
#[derive(Clone)]
pub struct Storage {
    path: PathBuf,
    slots: Arc<Mutex<BTreeMap<String, String>>>,
}

impl Storage {
    pub async fn load(path: PathBuf) -> Storage {
        let slots = match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(slots) => slots,
                Err(err) => {
                    error!("failed to parse data file: {err}");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                error!("failed to read data file: {err}");
                BTreeMap::new()
            }
        };

        Storage {
            path,
            slots: Arc::new(Mutex::new(slots)),
        }
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.slots.lock().await.get(key).cloned()
    }

    pub async fn set(&self, key: &str, value: String) -> Result<(), AppError> {
        let mut slots = self.slots.lock().await;
        slots.insert(key.to_string(), value);
        self.persist(&slots).await
    }

    pub async fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut slots = self.slots.lock().await;
        slots.remove(key);
        self.persist(&slots).await
    }

    async fn persist(&self, slots: &BTreeMap<String, String>) -> Result<(), AppError> {
        let payload = serde_json::to_vec_pretty(slots).map_err(AppError::internal)?;
        fs::write(&self.path, payload).await.map_err(AppError::internal)?;
        Ok(())
    }
}
