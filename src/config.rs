use crate::error::{InfraCheckError, Result};
use crate::export::ExportFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// 保存データファイル（未設定ならデータディレクトリ）
    pub store_path: Option<PathBuf>,
    /// レポート出力先（未設定ならカレント）
    pub output_dir: Option<PathBuf>,
    /// 新規チェックリストに入れる技術者名
    pub technician_name: Option<String>,
    pub default_format: ExportFormat,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| InfraCheckError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("infracheck").join("config.json"))
    }

    /// 既定の保存データファイル
    pub fn default_store_path() -> Result<PathBuf> {
        let data = dirs::data_dir()
            .ok_or_else(|| InfraCheckError::Config("データディレクトリが見つかりません".into()))?;
        Ok(data.join("infracheck").join("store.json"))
    }

    pub fn resolved_store_path(&self) -> Result<PathBuf> {
        match &self.store_path {
            Some(path) => Ok(path.clone()),
            None => Self::default_store_path(),
        }
    }

    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = serde_json::from_str(r#"{"technician_name":"Ana"}"#).unwrap();
        assert_eq!(config.technician_name.as_deref(), Some("Ana"));
        assert!(config.store_path.is_none());
        assert_eq!(config.default_format, ExportFormat::All);
        assert_eq!(config.resolved_output_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_explicit_store_path_wins() {
        let config = Config {
            store_path: Some(PathBuf::from("/tmp/x.json")),
            ..Default::default()
        };
        assert_eq!(config.resolved_store_path().unwrap(), PathBuf::from("/tmp/x.json"));
    }
}
