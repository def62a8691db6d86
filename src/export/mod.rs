pub mod pdf;

use crate::error::Result;
use chrono::{DateTime, FixedOffset};
use infracheck_common::export::{render_doc, render_text, report_file_name, ReportKind};
use infracheck_common::{generate_conclusion, validate_for_report, ChecklistRecord};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 出力形式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Txt,
    Doc,
    Pdf,
    #[default]
    All,
}

impl ExportFormat {
    /// 出力するレポート種別（出力順）
    pub fn kinds(&self) -> &'static [ReportKind] {
        match self {
            ExportFormat::Txt => &[ReportKind::Text],
            ExportFormat::Doc => &[ReportKind::Doc],
            ExportFormat::Pdf => &[ReportKind::Pdf],
            ExportFormat::All => &[ReportKind::Text, ReportKind::Doc, ReportKind::Pdf],
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Txt),
            "doc" | "word" => Ok(ExportFormat::Doc),
            "pdf" => Ok(ExportFormat::Pdf),
            "all" => Ok(ExportFormat::All),
            _ => Err(format!("Unknown format: {}. Use txt, doc, pdf, or all", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Txt => write!(f, "txt"),
            ExportFormat::Doc => write!(f, "doc"),
            ExportFormat::Pdf => write!(f, "pdf"),
            ExportFormat::All => write!(f, "all"),
        }
    }
}

/// レポートを出力先ディレクトリに書き出し、書き出したパスを返す
///
/// 結論文は1回だけ生成し、全形式で同じものを使う。
/// 技術者名・拠点名が空なら何も書かずに `Validation` エラー。
pub fn export_report(
    record: &ChecklistRecord,
    format: ExportFormat,
    output_dir: &Path,
    now: DateTime<FixedOffset>,
) -> Result<Vec<PathBuf>> {
    validate_for_report(record)?;

    std::fs::create_dir_all(output_dir)?;
    let conclusion = generate_conclusion(record);
    let millis = now.timestamp_millis();

    let mut written = Vec::new();
    for &kind in format.kinds() {
        let path = output_dir.join(report_file_name(&record.location_name, kind, millis));
        match kind {
            ReportKind::Text => std::fs::write(&path, render_text(record, &conclusion))?,
            ReportKind::Doc => std::fs::write(&path, render_doc(record, &conclusion))?,
            ReportKind::Pdf => pdf::generate_pdf(record, &conclusion, &path)?,
        }
        log::info!("Report written: {}", path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("TXT".parse::<ExportFormat>().unwrap(), ExportFormat::Txt);
        assert_eq!("word".parse::<ExportFormat>().unwrap(), ExportFormat::Doc);
        assert_eq!("all".parse::<ExportFormat>().unwrap(), ExportFormat::All);
        assert!("xlsx".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_all_kinds_in_order() {
        assert_eq!(
            ExportFormat::All.kinds(),
            &[ReportKind::Text, ReportKind::Doc, ReportKind::Pdf]
        );
        assert_eq!(ExportFormat::Pdf.to_string(), "pdf");
    }
}
