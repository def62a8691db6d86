//! Report renderers shared by the CLI and tests.
//!
//! 各レンダラは (チェックリスト, 結論文) を受け取り、レコードを変更しない。

pub mod doc;
pub mod pdf_core;
pub mod text;

use chrono::{DateTime, FixedOffset};
use lazy_static::lazy_static;
use regex::Regex;

pub use doc::render_doc;
pub use pdf_core::render_pdf;
pub use text::render_text;

/// 真偽値の表示: true → "Sim", false → "Não"
pub fn bool_to_text(value: bool) -> &'static str {
    if value {
        "Sim"
    } else {
        "Não"
    }
}

/// 日時表示（pt-BR形式）: "05/03/2024, 14:30:00"
pub fn format_date_time(date: &DateTime<FixedOffset>) -> String {
    date.format("%d/%m/%Y, %H:%M:%S").to_string()
}

/// 日付のみ（pt-BR形式）: "05/03/2024"
pub fn format_date(date: &DateTime<FixedOffset>) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// 空文字なら代替表示
pub(crate) fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// 出力形式ごとの拡張子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Text,
    Doc,
    Pdf,
}

impl ReportKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportKind::Text => "txt",
            ReportKind::Doc => "doc",
            ReportKind::Pdf => "pdf",
        }
    }
}

/// 出力ファイル名: "Relatorio_{拠点名(空白→_)}[_{ミリ秒}].{拡張子}"
///
/// テキスト形式のみ連続出力での衝突を避けるため生成時刻を付ける。
/// パス区切り文字はファイルシステム上で使えないため "-" に置き換える。
pub fn report_file_name(location_name: &str, kind: ReportKind, generated_at_millis: i64) -> String {
    lazy_static! {
        static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    }
    let stem = WHITESPACE
        .replace_all(location_name, "_")
        .replace(['/', '\\'], "-");
    match kind {
        ReportKind::Text => format!("Relatorio_{}_{}.{}", stem, generated_at_millis, kind.extension()),
        ReportKind::Doc | ReportKind::Pdf => format!("Relatorio_{}.{}", stem, kind.extension()),
    }
}
