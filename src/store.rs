//! File-backed persistence for configuration documents.
//!
//! Supports TOML and JSON by file extension. Comments are read from a
//! sibling `<stem>-comments.json` file when present, and the previous
//! config file is copied to a timestamped backup before every overwrite.

use std::{
    path::{Path as FsPath, PathBuf},
    time::SystemTime,
};

use anyhow::{Context, bail};
use log::debug;
use serde_json::Value;
use tokio::fs;

use crate::controller::{ConfigDocument, ConfigStore};
use crate::data::{CommentMap, ConfigNode};

/// Derive the default comments path from a config path.
///
/// `config.toml` → `config-comments.json`, next to the config file.
pub fn default_comments_path(config: &FsPath) -> PathBuf {
    let binding = config
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name_split = binding.split(".").collect::<Vec<_>>();
    if name_split.len() > 1 {
        name_split.pop();
    }

    let name = format!("{}-comments.json", name_split.join("."));

    if let Some(parent) = config.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}

/// Persistence backed by a config file on disk.
pub struct FileStore {
    config: PathBuf,
    comments: PathBuf,
}

impl FileStore {
    /// A store over `config`, with comments at the default sibling path.
    pub fn new(config: impl Into<PathBuf>) -> Self {
        let config = config.into();
        let comments = default_comments_path(&config);
        Self { config, comments }
    }

    /// A store with an explicit comments file.
    pub fn with_comments(config: impl Into<PathBuf>, comments: impl Into<PathBuf>) -> Self {
        Self {
            config: config.into(),
            comments: comments.into(),
        }
    }

    /// The config file path.
    pub fn config_path(&self) -> &FsPath {
        &self.config
    }

    fn extension(&self) -> String {
        self.config
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string()
    }
}

impl ConfigStore for FileStore {
    async fn load(&self) -> anyhow::Result<ConfigDocument> {
        let content = fs::read_to_string(&self.config)
            .await
            .with_context(|| format!("failed to read {}", self.config.display()))?;

        let value: Value = match self.extension().as_str() {
            "json" => serde_json::from_str(&content)?,
            "toml" | "tml" => {
                let v: toml::Value = toml::from_str(&content)?;
                serde_json::to_value(v)?
            }
            ext => {
                bail!("Unsupported config file extension: {ext:?}");
            }
        };
        if !value.is_object() {
            bail!(
                "configuration root must be an object, found {}",
                ConfigNode::from(value).kind_name()
            );
        }

        let comments = if self.comments.exists() {
            let text = fs::read_to_string(&self.comments)
                .await
                .with_context(|| format!("failed to read {}", self.comments.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse {}", self.comments.display()))?
        } else {
            debug!("no comments file at {}", self.comments.display());
            CommentMap::new()
        };

        Ok(ConfigDocument {
            tree: ConfigNode::from(value),
            comments,
        })
    }

    async fn save(&self, tree: &ConfigNode) -> anyhow::Result<()> {
        let ext = self.extension();
        let value = Value::from(tree.clone());

        let s = match ext.as_str() {
            "toml" | "tml" => toml::to_string_pretty(&value)?,
            "json" => serde_json::to_string_pretty(&value)?,
            _ => {
                bail!("Unsupported config file extension: {ext:?}");
            }
        };

        if self.config.exists() {
            let secs = SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)?
                .as_secs();
            let backup_path = self.config.with_extension(format!("bk-{secs}.{ext}"));
            fs::copy(&self.config, &backup_path)
                .await
                .with_context(|| format!("failed to back up to {}", backup_path.display()))?;
        }

        fs::write(&self.config, s)
            .await
            .with_context(|| format!("failed to write {}", self.config.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_path_is_a_sibling() {
        assert_eq!(
            default_comments_path(FsPath::new("config.toml")),
            PathBuf::from("config-comments.json")
        );
        assert_eq!(
            default_comments_path(FsPath::new("/etc/app/swp_config.json")),
            PathBuf::from("/etc/app/swp_config-comments.json")
        );
    }

    #[tokio::test]
    async fn json_round_trip_through_disk() {
        let dir = std::env::temp_dir().join(format!(
            "dynconfig-test-{}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("config.json");
        fs::write(&path, r#"{ "a": { "b": 5, "c__HIDDEN": "s" } }"#)
            .await
            .unwrap();

        let store = FileStore::new(&path);
        let doc = store.load().await.unwrap();
        assert!(doc.comments.is_empty());

        store.save(&doc.tree).await.unwrap();
        let reloaded = store.load().await.unwrap();
        assert_eq!(reloaded.tree, doc.tree);

        fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn unsupported_extension_is_an_error() {
        let store = FileStore::new("config.yaml");
        assert!(store.save(&ConfigNode::Object(Default::default())).await.is_err());
    }
}
