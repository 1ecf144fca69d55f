use crate::error::Result;
use async_trait::async_trait;

pub mod file_slot;
pub mod memory_slot;

#[cfg(feature = "sqlite-storage")]
pub mod sqlite_slot;

/// Key-value slot backing board persistence
///
/// One key holds one serialized document. Implementations move opaque
/// strings; the store owns the format and validation.
#[async_trait]
pub trait KeyValueSlot: Send + Sync {
    /// Reads the value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
