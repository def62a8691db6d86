//! チェックリストJSONファイルの読み書き

use crate::error::{InfraCheckError, Result};
use infracheck_common::ChecklistRecord;
use std::path::Path;

/// JSONファイルからチェックリストを読み込み（不変条件を整えて返す）
pub fn read_record(path: &Path) -> Result<ChecklistRecord> {
    if !path.exists() {
        return Err(InfraCheckError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let record: ChecklistRecord = serde_json::from_str(&content)?;
    Ok(record.normalized())
}

/// チェックリストをJSONファイルに保存
pub fn write_record(path: &Path, record: &ChecklistRecord) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(record)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file() {
        let err = read_record(Path::new("/nonexistent/checklist.json")).unwrap_err();
        assert!(matches!(err, InfraCheckError::FileNotFound(_)));
    }

    #[test]
    fn test_unknown_cable_condition_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{"locationName":"CRT","visitDate":"2024-03-05T14:30:00-03:00","cableCondition":"Caótico"}"#,
        )
        .unwrap();
        let err = read_record(&path).unwrap_err();
        assert!(matches!(err, InfraCheckError::JsonParse(_)));
    }
}
