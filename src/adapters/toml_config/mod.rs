// TOML config adapter - Configuration management using TOML files

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::errors::{TrimError, TrimResult};
use crate::domain::model::{MIN_TRIM_SECONDS, THUMBNAIL_COUNT};
use crate::ports::ConfigPort;

/// TOML configuration adapter, string-keyed under a `[clipcut]` section
pub struct TomlConfigAdapter {
    config: RwLock<HashMap<String, String>>,
}

impl TomlConfigAdapter {
    /// Create an adapter pre-loaded with default values
    pub fn new() -> Self {
        let mut config = HashMap::new();
        config.insert("media_dir".to_string(), "clips".to_string());
        config.insert("thumbnail_dir".to_string(), "thumbnails".to_string());
        config.insert("catalog_path".to_string(), "catalog.json".to_string());
        config.insert(
            "min_trim_seconds".to_string(),
            MIN_TRIM_SECONDS.to_string(),
        );
        config.insert("thumbnail_count".to_string(), THUMBNAIL_COUNT.to_string());
        config.insert("overwrite_policy".to_string(), "always".to_string());
        Self {
            config: RwLock::new(config),
        }
    }

    /// Default config file location, next to the working directory
    pub fn default_config_path() -> PathBuf {
        PathBuf::from("clipcut.toml")
    }

    fn serialize(&self) -> String {
        let config = self.config.read().unwrap();
        let mut keys: Vec<&String> = config.keys().collect();
        keys.sort();

        let mut out = String::from("[clipcut]\n");
        for key in keys {
            out.push_str(&format!("{} = \"{}\"\n", key, config[key]));
        }
        out
    }

    fn deserialize(&self, content: &str) -> TrimResult<()> {
        let parsed: toml::Value = toml::from_str(content).map_err(|e| TrimError::Config {
            reason: format!("Failed to parse TOML config: {}", e),
        })?;

        let mut config = self.config.write().unwrap();
        if let Some(table) = parsed.get("clipcut").and_then(|v| v.as_table()) {
            for (key, value) in table {
                if let Some(str_value) = value.as_str() {
                    config.insert(key.clone(), str_value.to_string());
                }
            }
        }
        Ok(())
    }
}

impl Default for TomlConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigPort for TomlConfigAdapter {
    async fn get(&self, key: &str) -> TrimResult<Option<String>> {
        Ok(self.config.read().unwrap().get(key).cloned())
    }

    async fn get_or_default(&self, key: &str, default: &str) -> TrimResult<String> {
        Ok(self
            .config
            .read()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string()))
    }

    async fn set(&self, key: &str, value: &str) -> TrimResult<()> {
        self.config
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn load_file(&self, file_path: &str) -> TrimResult<()> {
        let content = std::fs::read_to_string(file_path).map_err(|e| TrimError::Config {
            reason: format!("Failed to read config file {}: {}", file_path, e),
        })?;
        self.deserialize(&content)
    }

    async fn save_file(&self, file_path: &str) -> TrimResult<()> {
        let path = PathBuf::from(file_path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&path, self.serialize())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn defaults_are_present() {
        let config = TomlConfigAdapter::new();
        assert_eq!(
            config.get("thumbnail_count").await.unwrap().as_deref(),
            Some("10")
        );
        assert_eq!(
            config.get("overwrite_policy").await.unwrap().as_deref(),
            Some("always")
        );
        assert_eq!(
            config.get_or_default("missing", "fallback").await.unwrap(),
            "fallback"
        );
    }

    #[tokio::test]
    async fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clipcut.toml");

        let config = TomlConfigAdapter::new();
        config.set("media_dir", "/tmp/clips").await.unwrap();
        config.save_file(path.to_str().unwrap()).await.unwrap();

        let loaded = TomlConfigAdapter::new();
        loaded.load_file(path.to_str().unwrap()).await.unwrap();
        assert_eq!(
            loaded.get("media_dir").await.unwrap().as_deref(),
            Some("/tmp/clips")
        );
    }
}
