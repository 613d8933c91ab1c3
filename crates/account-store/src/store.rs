//! Account store with optional JSON file persistence.

use crate::error::StoreError;
use crate::types::{LinkedAccount, StoreData, DATA_VERSION};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// Where the store writes its data.
enum Backend {
    /// JSON file, rewritten atomically on every mutation.
    File(PathBuf),
    /// Nothing is persisted.
    Memory,
}

/// Store of linked accounts keyed by bare JID.
///
/// Mutations hold the write lock across the in-memory change and the flush
/// to disk, so a register and an unregister for the same JID never
/// interleave.
#[derive(Clone)]
pub struct AccountStore {
    data: Arc<RwLock<StoreData>>,
    backend: Arc<Backend>,
}

impl AccountStore {
    /// Create a store that only lives in memory.
    pub fn in_memory() -> Self {
        Self {
            data: Arc::new(RwLock::new(StoreData::default())),
            backend: Arc::new(Backend::Memory),
        }
    }

    /// Open a file-backed store, loading existing accounts.
    ///
    /// A missing file is treated as an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let data = load(&path).await?;

        info!(
            "Account store opened with {} linked accounts from {:?}",
            data.accounts.len(),
            path
        );

        Ok(Self {
            data: Arc::new(RwLock::new(data)),
            backend: Arc::new(Backend::File(path)),
        })
    }

    /// Look up the account linked to a JID.
    pub async fn get(&self, jid: &str) -> Option<LinkedAccount> {
        self.data.read().await.accounts.get(jid).cloned()
    }

    /// Check whether a JID has a linked account.
    pub async fn contains(&self, jid: &str) -> bool {
        self.data.read().await.accounts.contains_key(jid)
    }

    /// Number of linked accounts.
    pub async fn count(&self) -> usize {
        self.data.read().await.accounts.len()
    }

    /// Link a new account. Fails if the JID already has one.
    #[instrument(skip(self, account), fields(jid = %account.jid))]
    pub async fn insert(&self, account: LinkedAccount) -> Result<(), StoreError> {
        let mut data = self.data.write().await;

        if data.accounts.contains_key(&account.jid) {
            return Err(StoreError::AlreadyExists(account.jid));
        }

        let jid = account.jid.clone();
        data.accounts.insert(jid.clone(), account);

        if let Err(e) = self.flush(&data).await {
            data.accounts.remove(&jid);
            return Err(e);
        }

        debug!("Linked account for {}", jid);
        Ok(())
    }

    /// Remove the account linked to a JID and return it.
    #[instrument(skip(self))]
    pub async fn remove(&self, jid: &str) -> Result<LinkedAccount, StoreError> {
        let mut data = self.data.write().await;

        let account = data
            .accounts
            .remove(jid)
            .ok_or_else(|| StoreError::NotFound(jid.to_string()))?;

        if let Err(e) = self.flush(&data).await {
            data.accounts.insert(jid.to_string(), account);
            return Err(e);
        }

        debug!("Removed account for {}", jid);
        Ok(account)
    }

    async fn flush(&self, data: &StoreData) -> Result<(), StoreError> {
        match self.backend.as_ref() {
            Backend::File(path) => save(path, data).await,
            Backend::Memory => Ok(()),
        }
    }
}

async fn load(path: &Path) -> Result<StoreData, StoreError> {
    if !path.exists() {
        info!("Account file not found at {:?}, starting empty", path);
        return Ok(StoreData::default());
    }

    let bytes = fs::read(path).await?;
    let data: StoreData = serde_json::from_slice(&bytes)?;

    if data.version != DATA_VERSION {
        return Err(StoreError::Version {
            found: data.version,
            expected: DATA_VERSION,
        });
    }

    Ok(data)
}

/// Write atomically using temp file + rename.
async fn save(path: &Path, data: &StoreData) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_vec_pretty(data)?;
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, &json).await?;
    fs::rename(&temp_path, path).await?;

    debug!("Saved {} accounts to {:?}", data.accounts.len(), path);
    Ok(())
}
