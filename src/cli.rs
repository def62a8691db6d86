use crate::export::ExportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "infracheck")]
#[command(about = "Checklist de visita técnica de TI e geração de relatórios", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 対話形式でチェックリストを入力
    New {
        /// 拠点名（保存済みなら再開）
        #[arg(short, long)]
        location: Option<String>,

        /// チェックリストJSONの出力先
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// チェックリストからレポートを生成
    Report {
        /// チェックリストJSONファイル
        #[arg(required_unless_present = "location", conflicts_with = "location")]
        input: Option<PathBuf>,

        /// 保存済みチェックリストの拠点名
        #[arg(short, long)]
        location: Option<String>,

        /// 出力形式 (txt/doc/pdf/all)、省略時は設定値
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// 出力ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 技術所見（結論文）を表示
    Conclusion {
        /// チェックリストJSONファイル
        #[arg(required_unless_present = "location", conflicts_with = "location")]
        input: Option<PathBuf>,

        /// 保存済みチェックリストの拠点名
        #[arg(short, long)]
        location: Option<String>,
    },

    /// 最近の訪問履歴を表示
    History,

    /// 拠点名の候補を表示
    Locations {
        /// 検索文字列
        #[arg(required = true)]
        query: String,
    },

    /// 設定を表示/編集
    Config {
        /// 保存データファイルを設定
        #[arg(long)]
        set_store: Option<PathBuf>,

        /// レポート出力先を設定
        #[arg(long)]
        set_output_dir: Option<PathBuf>,

        /// 技術者名を設定
        #[arg(long)]
        set_technician: Option<String>,

        /// 既定の出力形式を設定
        #[arg(long)]
        set_format: Option<ExportFormat>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
