//! レポート出力の統合テスト

use chrono::{DateTime, FixedOffset};
use infracheck::error::InfraCheckError;
use infracheck::export::{export_report, pdf, ExportFormat};
use infracheck_common::{AntennaDevice, ChecklistRecord, ProblematicMachine, SwitchDevice};
use tempfile::tempdir;

fn visit_date() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2024-03-05T14:30:00-03:00").unwrap()
}

fn create_test_record(switches: usize) -> ChecklistRecord {
    let mut record = ChecklistRecord::for_location("Jeep / RAM BR", visit_date());
    record.technician_name = "Ana Souza".to_string();
    record.responsible_name = "Carlos".to_string();
    for i in 0..switches {
        record = record.with_switch(SwitchDevice {
            quantity: 1,
            brand: "Cisco".to_string(),
            model: format!("SG{}", 300 + i),
            ..Default::default()
        });
    }
    record = record.with_antenna(AntennaDevice::default());
    record = record.set_all_machines_ok(false);
    record.problematic_machines[0].identifier = "PC-01".to_string();
    record = record.with_machine(ProblematicMachine {
        identifier: "PC-02".to_string(),
        problem_description: "Não liga".to_string(),
        ..Default::default()
    });
    record
}

#[test]
fn test_export_all_formats() {
    let dir = tempdir().expect("Failed to create temp dir");
    let record = create_test_record(2);

    let paths = export_report(&record, ExportFormat::All, dir.path(), visit_date())
        .expect("レポート出力に失敗");

    let names: Vec<String> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            format!("Relatorio_Jeep_-_RAM_BR_{}.txt", visit_date().timestamp_millis()),
            "Relatorio_Jeep_-_RAM_BR.doc".to_string(),
            "Relatorio_Jeep_-_RAM_BR.pdf".to_string(),
        ]
    );
    for path in &paths {
        let metadata = std::fs::metadata(path).expect("ファイルメタデータ取得失敗");
        assert!(metadata.len() > 0, "空ファイル: {}", path.display());
    }

    let pdf_bytes = std::fs::read(&paths[2]).unwrap();
    assert!(pdf_bytes.starts_with(b"%PDF"));
}

#[test]
fn test_same_conclusion_in_text_and_doc() {
    let dir = tempdir().expect("Failed to create temp dir");
    let record = create_test_record(1);
    let conclusion = infracheck_common::generate_conclusion(&record);

    let paths = export_report(&record, ExportFormat::All, dir.path(), visit_date()).unwrap();
    let text = std::fs::read_to_string(&paths[0]).unwrap();
    let doc = std::fs::read_to_string(&paths[1]).unwrap();

    assert!(text.contains(&conclusion));
    assert!(doc.contains("1 switch(es) de rede e 1 antena(s) Wi-Fi"));
    assert!(conclusion.contains("estações de trabalho com anomalias"));
}

#[test]
fn test_single_format() {
    let dir = tempdir().expect("Failed to create temp dir");
    let paths = export_report(&create_test_record(0), ExportFormat::Doc, dir.path(), visit_date()).unwrap();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].extension().unwrap(), "doc");
}

#[test]
fn test_missing_technician_writes_nothing() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut record = create_test_record(1);
    record.technician_name.clear();

    let result = export_report(&record, ExportFormat::All, dir.path(), visit_date());
    assert!(matches!(result, Err(InfraCheckError::Validation(_))));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_long_report_pdf_has_multiple_pages() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("long.pdf");
    let record = create_test_record(40);
    let conclusion = infracheck_common::generate_conclusion(&record);

    let report = infracheck_common::render_pdf(&record, &conclusion);
    assert!(report.pages.len() > 1);

    pdf::generate_pdf(&record, &conclusion, &output_path).expect("PDF生成に失敗");
    assert!(std::fs::metadata(&output_path).unwrap().len() > 0);
}
