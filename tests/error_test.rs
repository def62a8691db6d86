//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use infracheck::checklist_file;
use infracheck::error::InfraCheckError;
use infracheck_common::{RequiredField, ValidationError};
use std::path::Path;
use tempfile::tempdir;

/// 存在しないチェックリストファイル
#[test]
fn test_read_nonexistent_record() {
    let result = checklist_file::read_record(Path::new("/nonexistent/path/12345.json"));
    assert!(matches!(result, Err(InfraCheckError::FileNotFound(_))));
}

/// JSONとして壊れたファイル
#[test]
fn test_read_broken_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = checklist_file::read_record(&path);
    assert!(matches!(result, Err(InfraCheckError::JsonParse(_))));
}

/// 保存して読み戻すと同じ内容
#[test]
fn test_write_then_read_record() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("sub").join("crt.json");
    let date = chrono::DateTime::parse_from_rfc3339("2024-03-05T14:30:00-03:00").unwrap();
    let mut record = infracheck_common::ChecklistRecord::for_location("CRT", date);
    record.technician_name = "Ana".into();

    checklist_file::write_record(&path, &record).unwrap();
    let loaded = checklist_file::read_record(&path).unwrap();
    assert_eq!(loaded, record);
}

/// InfraCheckErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        InfraCheckError::Config("テスト設定エラー".to_string()),
        InfraCheckError::FileNotFound("crt.json".to_string()),
        InfraCheckError::PdfGeneration("PDF生成エラー".to_string()),
        InfraCheckError::Prompt("interrupted".to_string()),
        InfraCheckError::Validation(ValidationError {
            missing: vec![RequiredField::TechnicianName],
        }),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// 入力チェックのメッセージ
#[test]
fn test_validation_message() {
    let err = InfraCheckError::from(ValidationError {
        missing: vec![RequiredField::LocationName, RequiredField::TechnicianName],
    });
    let display = err.to_string();
    assert!(display.starts_with("Preencha o Nome do Local e do Técnico para continuar"));
    assert!(display.contains("Nome do Local, Nome do Técnico"));
}
