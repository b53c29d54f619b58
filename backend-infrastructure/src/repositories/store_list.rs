use std::path::Path;

use async_trait::async_trait;
use tokio::fs;

use backend_domain::StoreListRepository;

/// YAML-backed store allow-list, editable by hand or via the admin API.
pub struct StoreListFileRepository;

impl StoreListFileRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StoreListFileRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreListRepository for StoreListFileRepository {
    async fn load_stores(&self, path: &str) -> anyhow::Result<Vec<String>> {
        if !Path::new(path).exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path).await?;
        let stores: Vec<String> = serde_yaml::from_str(&content)?;
        Ok(stores)
    }

    async fn save_stores(&self, path: &str, stores: &[String]) -> anyhow::Result<()> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_yaml::to_string(stores)?;
        fs::write(path, content).await?;
        Ok(())
    }
}
