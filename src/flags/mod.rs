//! Flags
//!
//! Small persisted key/value flags the app keeps between sessions, and the
//! service guide that decides whether to show first-run help.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tokio::sync::RwLock;

pub mod guide;

pub use guide::{ResumeOutcome, ServiceGuide};

/// Set once the user has dismissed the service introduction.
pub const INTRO_SEEN_KEY: &str = "hasSeenServiceIntro";

/// JSON-encoded [`crate::booking::PetInfo`] saved from the last booking.
pub const PET_INFO_KEY: &str = "petInfo";

/// Flag store errors
#[derive(Debug, Error)]
pub enum FlagStoreError {
    /// The backing storage could not be reached
    #[error("flag storage unavailable: {0}")]
    Unavailable(String),

    /// A stored value could not be encoded or decoded
    #[error("invalid flag value: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Persistent string flags keyed by name.
#[automock]
#[async_trait]
pub trait FlagStore: Send + Sync {
    /// Read a flag. `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, FlagStoreError>;

    /// Write a flag, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    async fn set(&self, key: &str, value: &str) -> Result<(), FlagStoreError>;
}

/// In-process flag store.
#[derive(Debug, Default)]
pub struct MemoryFlagStore {
    values: RwLock<FxHashMap<String, String>>,
}

impl MemoryFlagStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlagStore for MemoryFlagStore {
    async fn get(&self, key: &str) -> Result<Option<String>, FlagStoreError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), FlagStoreError> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());

        Ok(())
    }
}
