//! エラー型定義

use thiserror::Error;

/// 必須入力項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    LocationName,
    TechnicianName,
}

impl RequiredField {
    /// 画面表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            RequiredField::LocationName => "Nome do Local",
            RequiredField::TechnicianName => "Nome do Técnico",
        }
    }
}

/// レポート生成前の入力チェックエラー（致命的ではない）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Preencha o Nome do Local e do Técnico para continuar (faltando: {})", join_labels(.missing))]
pub struct ValidationError {
    pub missing: Vec<RequiredField>,
}

fn join_labels(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Corrupt store entry `{key}`: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_display_corrupt() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = Error::Corrupt {
            key: "infracheck_history".to_string(),
            source,
        };
        assert!(format!("{}", error).contains("infracheck_history"));
    }

    #[test]
    fn test_validation_error_lists_missing_fields() {
        let error = ValidationError {
            missing: vec![RequiredField::LocationName, RequiredField::TechnicianName],
        };
        let display = format!("{}", error);
        assert!(display.starts_with("Preencha o Nome do Local e do Técnico"));
        assert!(display.contains("Nome do Local, Nome do Técnico"));
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
    }
}
