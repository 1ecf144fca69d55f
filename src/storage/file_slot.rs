use crate::{error::Result, storage::KeyValueSlot};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based slot storing one JSON file per key
///
/// Values live under a `.tabula` directory in the given root, created
/// lazily on the first write.
pub struct FileSlot {
    root_path: PathBuf,
}

impl FileSlot {
    const TABULA_DIR: &'static str = ".tabula";

    /// Creates a new FileSlot rooted at the given directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root_path: root.as_ref().join(Self::TABULA_DIR),
        }
    }

    fn key_file(&self, key: &str) -> PathBuf {
        self.root_path.join(format!("{}.json", key))
    }

    async fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_path.exists() {
            fs::create_dir_all(&self.root_path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueSlot for FileSlot {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_file(key);

        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path).await?;
        Ok(Some(contents))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_directory_exists().await?;

        fs::write(self.key_file(key), value).await?;
        Ok(())
    }
}
