use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::PathBuf;

use axum::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

/// Number of recent meals remembered per user.
pub const RECENT_CAPACITY: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("ledger io: {0}")]
    Io(#[from] std::io::Error),
    #[error("ledger json: {0}")]
    Json(#[from] serde_json::Error),
}

#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn get(&self, user_id: &str) -> Result<Vec<String>, LedgerError>;
    async fn add(&self, user_id: &str, name: &str) -> Result<(), LedgerError>;
}

/// Appends `name` unless already present, then keeps only the newest entries.
pub fn push_recent(meals: &mut Vec<String>, name: &str) {
    if !meals.iter().any(|m| m == name) {
        meals.push(name.to_string());
    }
    if meals.len() > RECENT_CAPACITY {
        let overflow = meals.len() - RECENT_CAPACITY;
        meals.drain(..overflow);
    }
}

type Mapping = BTreeMap<String, Vec<String>>;

/// Whole-file JSON ledger: `{ "<user_id>": ["<name>", ...] }`.
pub struct JsonFileLedger {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[cfg(test)]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    async fn load(&self) -> Result<Mapping, LedgerError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Mapping::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Mapping::new());
        }
        Ok(serde_json::from_slice(&raw)?)
    }

    async fn save(&self, data: &Mapping) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_vec_pretty(data)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        tokio::fs::write(&tmp, &body).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl LedgerStore for JsonFileLedger {
    async fn get(&self, user_id: &str) -> Result<Vec<String>, LedgerError> {
        let mut data = self.load().await?;
        Ok(data.remove(user_id).unwrap_or_default())
    }

    async fn add(&self, user_id: &str, name: &str) -> Result<(), LedgerError> {
        let _guard = self.write_lock.lock().await;
        let mut data = self.load().await?;
        let meals = data.entry(user_id.to_string()).or_default();
        push_recent(meals, name);
        debug!(user_id, meal = name, recent = meals.len(), "ledger updated");
        self.save(&data).await
    }
}

#[derive(Default)]
pub struct MemoryLedger {
    data: Mutex<HashMap<String, Vec<String>>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedger {
    async fn get(&self, user_id: &str) -> Result<Vec<String>, LedgerError> {
        Ok(self.data.lock().await.get(user_id).cloned().unwrap_or_default())
    }

    async fn add(&self, user_id: &str, name: &str) -> Result<(), LedgerError> {
        let mut data = self.data.lock().await;
        push_recent(data.entry(user_id.to_string()).or_default(), name);
        Ok(())
    }
}
