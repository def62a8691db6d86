//! JSONファイル上のキー・バリューストア
//!
//! ストア全体を1つのJSONファイルに保持し、書き込みのたびに全体を保存する。
//! 読み込めないファイル（破損・バージョン違い）は空として扱い、
//! 次の書き込みで作り直す。

use infracheck_common::error::{Error as CommonError, Result as CommonResult};
use infracheck_common::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// ファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreFile {
    /// バージョン（互換性チェック用）
    version: u32,
    /// キー → 値（値はJSON文字列）
    entries: BTreeMap<String, String>,
}

impl Default for StoreFile {
    fn default() -> Self {
        Self {
            version: JsonFileStore::CURRENT_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    file: StoreFile,
}

impl JsonFileStore {
    const CURRENT_VERSION: u32 = 1;

    /// ストアファイルを開く（存在しなければ空）
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file = Self::read_file(&path);
        Self { path, file }
    }

    fn read_file(path: &Path) -> StoreFile {
        if !path.exists() {
            return StoreFile::default();
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                log::warn!("Failed to open store {}: {e}", path.display());
                return StoreFile::default();
            }
        };

        match serde_json::from_reader::<_, StoreFile>(BufReader::new(file)) {
            Ok(store) if store.version == Self::CURRENT_VERSION => store,
            Ok(store) => {
                log::warn!(
                    "Store version mismatch ({} != {}), starting empty",
                    store.version,
                    Self::CURRENT_VERSION
                );
                StoreFile::default()
            }
            Err(e) => {
                log::warn!("Corrupt store {}: {e}, starting empty", path.display());
                StoreFile::default()
            }
        }
    }

    fn flush(&self) -> CommonResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &self.file)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 保存済みキー数
    pub fn len(&self) -> usize {
        self.file.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file.entries.is_empty()
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> CommonResult<Option<String>> {
        Ok(self.file.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> CommonResult<()> {
        self.file.entries.insert(key.to_string(), value);
        self.flush()
            .map_err(|e| CommonError::Store(format!("{}: {e}", self.path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut store = JsonFileStore::open(&path);
        assert!(store.is_empty());
        store.set("a", "[1,2]".into()).unwrap();

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("a").unwrap().as_deref(), Some("[1,2]"));
        assert_eq!(reopened.len(), 1);
    }

    #[test]
    fn test_unwritable_path_reports_store_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let path = blocker.join("store.json");

        let mut store = JsonFileStore::open(&path);
        let err = store.set("a", "1".into()).unwrap_err();
        assert!(matches!(err, CommonError::Store(ref msg) if msg.contains("store.json")));
    }

    #[test]
    fn test_version_mismatch_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, r#"{"version":99,"entries":{"a":"1"}}"#).unwrap();

        let store = JsonFileStore::open(&path);
        assert!(store.get("a").unwrap().is_none());
    }
}
