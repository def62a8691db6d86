//! InfraCheck
//!
//! 技術訪問チェックリストの入力・保存・レポート出力（CLI）

pub mod checklist_file;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod file_store;
pub mod form;
