//! ローカル保存ストア
//!
//! 文字列キー → 文字列値の単純なストアを抽象化し、その上に
//! 訪問履歴・保存済みチェックリスト・ユーザー登録拠点の3つのキーを載せる。
//!
//! 2つのキーへの書き込みは原子的ではない（途中で落ちると不整合になりうる）。

use crate::error::{Error, Result};
use crate::types::ChecklistRecord;
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// 訪問履歴: 拠点名 → 最終訪問日時(ISO-8601)
pub const HISTORY_KEY: &str = "infracheck_history";
/// 保存データ: 拠点名 → チェックリスト全体
pub const SAVED_DATA_KEY: &str = "infracheck_saved_data";
/// ユーザー登録拠点
pub const CUSTOM_LOCATIONS_KEY: &str = "infracheck_custom_locations";

/// キー・バリューストア
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

/// メモリ上のストア（テスト・保存無効時用）
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// 訪問履歴の1件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitEntry {
    pub location_name: String,
    pub visited_at: DateTime<FixedOffset>,
}

/// チェックリスト保存リポジトリ
#[derive(Debug)]
pub struct ChecklistRepository<S> {
    store: S,
}

impl<S: KeyValueStore> ChecklistRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn read_json<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        match self.store.get(key)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| Error::Corrupt {
                key: key.to_string(),
                source,
            }),
            None => Ok(T::default()),
        }
    }

    fn write_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, raw)
    }

    // ---------- 保存データ ----------

    /// チェックリストを拠点名キーで保存（同名は上書き）
    pub fn save(&mut self, record: &ChecklistRecord) -> Result<()> {
        if record.location_name.is_empty() {
            log::debug!("拠点名が空のため保存をスキップ");
            return Ok(());
        }
        // 他拠点のエントリは形を問わずそのまま残す
        let mut saved: BTreeMap<String, serde_json::Value> = self.read_json(SAVED_DATA_KEY)?;
        saved.insert(record.location_name.clone(), serde_json::to_value(record)?);
        self.write_json(SAVED_DATA_KEY, &saved)
    }

    /// 拠点名で保存データを読み込み
    pub fn load_by_location(&self, name: &str) -> Result<Option<ChecklistRecord>> {
        let mut saved: BTreeMap<String, serde_json::Value> = self.read_json(SAVED_DATA_KEY)?;
        match saved.remove(name) {
            Some(value) => {
                let record: ChecklistRecord =
                    serde_json::from_value(value).map_err(|source| Error::Corrupt {
                        key: format!("{}/{}", SAVED_DATA_KEY, name),
                        source,
                    })?;
                Ok(Some(record.normalized()))
            }
            None => Ok(None),
        }
    }

    /// 保存済みの拠点名一覧
    pub fn saved_locations(&self) -> Result<Vec<String>> {
        let saved: BTreeMap<String, serde_json::Value> = self.read_json(SAVED_DATA_KEY)?;
        Ok(saved.into_keys().collect())
    }

    // ---------- 訪問履歴 ----------

    pub fn record_visit(&mut self, name: &str, at: DateTime<FixedOffset>) -> Result<()> {
        let mut history: BTreeMap<String, String> = self.read_json(HISTORY_KEY)?;
        history.insert(
            name.to_string(),
            at.with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        );
        self.write_json(HISTORY_KEY, &history)
    }

    pub fn last_visit(&self, name: &str) -> Result<Option<DateTime<FixedOffset>>> {
        let history: BTreeMap<String, String> = self.read_json(HISTORY_KEY)?;
        Ok(history
            .get(name)
            .and_then(|raw| parse_timestamp(name, raw)))
    }

    /// 訪問履歴（新しい順）
    pub fn recent_visits(&self) -> Result<Vec<VisitEntry>> {
        let history: BTreeMap<String, String> = self.read_json(HISTORY_KEY)?;
        let mut visits: Vec<VisitEntry> = history
            .iter()
            .filter_map(|(name, raw)| {
                parse_timestamp(name, raw).map(|visited_at| VisitEntry {
                    location_name: name.clone(),
                    visited_at,
                })
            })
            .collect();
        visits.sort_by(|a, b| {
            b.visited_at
                .cmp(&a.visited_at)
                .then_with(|| a.location_name.cmp(&b.location_name))
        });
        Ok(visits)
    }

    // ---------- ユーザー登録拠点 ----------

    pub fn load_custom_locations(&self) -> Result<Vec<String>> {
        self.read_json(CUSTOM_LOCATIONS_KEY)
    }

    pub fn save_custom_locations(&mut self, locations: &[String]) -> Result<()> {
        self.write_json(CUSTOM_LOCATIONS_KEY, &locations)
    }

    // ---------- セッション操作（失敗はログのみ） ----------

    /// レポート生成時の記録: 訪問履歴 → 保存データの順に書き込む
    ///
    /// 失敗はログに出して無視し、作業中のデータはメモリ上に残す。
    /// 書き込めた場合true。
    pub fn remember(&mut self, record: &ChecklistRecord, now: DateTime<FixedOffset>) -> bool {
        if record.location_name.is_empty() {
            return false;
        }
        let result = self
            .record_visit(&record.location_name, now)
            .and_then(|_| self.save(record));
        match result {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to save history: {e}");
                false
            }
        }
    }

    /// 訪問を開始: 保存済みがあれば日時を更新して再開、なければ新規
    pub fn start_visit(&self, location: Option<&str>, now: DateTime<FixedOffset>) -> ChecklistRecord {
        let Some(name) = location else {
            return ChecklistRecord::new(now);
        };
        match self.load_by_location(name) {
            Ok(Some(saved)) => saved.resume(now),
            Ok(None) => ChecklistRecord::for_location(name, now),
            Err(e) => {
                log::error!("Failed to load saved checklist for {name}: {e}");
                ChecklistRecord::for_location(name, now)
            }
        }
    }

    /// ユーザー登録拠点を読み込み（失敗時は空）
    pub fn custom_locations_or_default(&self) -> Vec<String> {
        self.load_custom_locations().unwrap_or_else(|e| {
            log::error!("Erro ao carregar locais salvos: {e}");
            Vec::new()
        })
    }

    /// 訪問履歴を読み込み（失敗時は空）
    pub fn recent_visits_or_default(&self) -> Vec<VisitEntry> {
        self.recent_visits().unwrap_or_else(|e| {
            log::error!("Erro ao carregar histórico de visitas: {e}");
            Vec::new()
        })
    }
}

fn parse_timestamp(name: &str, raw: &str) -> Option<DateTime<FixedOffset>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => Some(ts),
        Err(e) => {
            log::warn!("Invalid visit timestamp for {name}: {raw} ({e})");
            None
        }
    }
}
