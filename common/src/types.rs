//! チェックリストの型定義
//!
//! CLIと保存データで共有される型:
//! - ChecklistRecord: 1回の訪問点検の全データ
//! - SwitchDevice / AntennaDevice / ProblematicMachine: 一覧項目
//! - Brand: 既知ブランド or 自由入力
//!
//! JSON形状はブラウザ版の保存データと同一（camelCase）。

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

// ============================================
// 識別子
// ============================================

/// 一覧項目のID（プロセス内で一意、項目の生存中は不変）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================
// 配線状態
// ============================================

/// 配線の整理状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CableCondition {
    #[default]
    #[serde(rename = "Organizado")]
    Organized,
    #[serde(rename = "Parcial")]
    Partial,
    #[serde(rename = "Desorganizado")]
    Disorganized,
}

impl CableCondition {
    pub const ALL: [CableCondition; 3] = [
        CableCondition::Organized,
        CableCondition::Partial,
        CableCondition::Disorganized,
    ];

    /// レポート表示名
    pub fn label(&self) -> &'static str {
        match self {
            CableCondition::Organized => "Organizado",
            CableCondition::Partial => "Parcial",
            CableCondition::Disorganized => "Desorganizado",
        }
    }
}

impl fmt::Display for CableCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================
// ブランド（既知 or 自由入力）
// ============================================

/// 選択肢として用意されたブランド
pub trait KnownBrand: Copy + PartialEq + fmt::Debug + 'static {
    /// 選択肢の一覧（表示順）
    const ALL: &'static [Self];
    /// 新規項目の既定値
    const DEFAULT: Self;

    fn name(&self) -> &'static str;
}

/// 既知ブランドまたは自由入力のブランド
///
/// 保存・出力時はプレーンな文字列に正規化される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Brand<K> {
    Known(K),
    Custom(String),
}

impl<K: KnownBrand> Brand<K> {
    /// 文字列から解釈（既知名は大文字小文字を区別して一致）
    pub fn parse(value: &str) -> Self {
        K::ALL
            .iter()
            .find(|known| known.name() == value)
            .map(|known| Brand::Known(*known))
            .unwrap_or_else(|| Brand::Custom(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Brand::Known(known) => known.name(),
            Brand::Custom(name) => name,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Brand::Custom(_))
    }
}

impl<K: KnownBrand> Default for Brand<K> {
    fn default() -> Self {
        Brand::Known(K::DEFAULT)
    }
}

impl<K: KnownBrand> fmt::Display for Brand<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<K: KnownBrand> Serialize for Brand<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de, K: KnownBrand> Deserialize<'de> for Brand<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BrandVisitor<K>(PhantomData<K>);

        impl<K: KnownBrand> serde::de::Visitor<'_> for BrandVisitor<K> {
            type Value = Brand<K>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a brand name")
            }

            fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Brand::parse(value))
            }
        }

        deserializer.deserialize_str(BrandVisitor(PhantomData))
    }
}

/// Wi-Fiアンテナの既知ブランド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AntennaVendor {
    UniFi,
    Aruba,
}

impl KnownBrand for AntennaVendor {
    const ALL: &'static [Self] = &[AntennaVendor::UniFi, AntennaVendor::Aruba];
    const DEFAULT: Self = AntennaVendor::UniFi;

    fn name(&self) -> &'static str {
        match self {
            AntennaVendor::UniFi => "UniFi",
            AntennaVendor::Aruba => "Aruba",
        }
    }
}

/// ファイアウォールの既知ブランド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirewallVendor {
    Fortinet,
    SonicWall,
}

impl KnownBrand for FirewallVendor {
    const ALL: &'static [Self] = &[FirewallVendor::Fortinet, FirewallVendor::SonicWall];
    const DEFAULT: Self = FirewallVendor::Fortinet;

    fn name(&self) -> &'static str {
        match self {
            FirewallVendor::Fortinet => "Fortinet",
            FirewallVendor::SonicWall => "SonicWall",
        }
    }
}

pub type AntennaBrand = Brand<AntennaVendor>;
pub type FirewallBrand = Brand<FirewallVendor>;

// ============================================
// 一覧項目
// ============================================

/// 新規スイッチのポート数既定値
pub const DEFAULT_SWITCH_PORTS: u32 = 24;

/// スイッチ（同型機のグループ）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchDevice {
    pub id: ItemId,
    pub quantity: u32,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    pub ports: u32,
    pub condition_ok: bool,
    #[serde(default)]
    pub notes: String,
}

impl Default for SwitchDevice {
    fn default() -> Self {
        Self {
            id: ItemId::new(),
            quantity: 1,
            brand: String::new(),
            model: String::new(),
            ports: DEFAULT_SWITCH_PORTS,
            condition_ok: true,
            notes: String::new(),
        }
    }
}

/// Wi-Fiアンテナ（同型機のグループ）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AntennaDevice {
    pub id: ItemId,
    pub quantity: u32,
    pub brand: AntennaBrand,
    pub is_working: bool,
    #[serde(default)]
    pub notes: String,
}

impl Default for AntennaDevice {
    fn default() -> Self {
        Self {
            id: ItemId::new(),
            quantity: 1,
            brand: AntennaBrand::default(),
            is_working: true,
            notes: String::new(),
        }
    }
}

/// 問題のある端末
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblematicMachine {
    pub id: ItemId,
    /// 資産番号または端末名
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub processor_gen: String,
    /// Windows 11 更新済み
    pub os_updated: bool,
    #[serde(default)]
    pub problem_description: String,
}

impl Default for ProblematicMachine {
    fn default() -> Self {
        Self {
            id: ItemId::new(),
            identifier: String::new(),
            processor_gen: String::new(),
            os_updated: true,
            problem_description: String::new(),
        }
    }
}

// ============================================
// チェックリスト本体
// ============================================

/// 1回の訪問点検データ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistRecord {
    // 1. 拠点情報
    #[serde(default)]
    pub location_name: String,
    #[serde(default)]
    pub responsible_name: String,
    pub visit_date: DateTime<FixedOffset>,

    // 2. サーバ室 / ネットワーク基盤
    #[serde(default)]
    pub cable_condition: CableCondition,
    #[serde(default)]
    pub cable_notes: String,

    #[serde(default)]
    pub switches: Vec<SwitchDevice>,

    #[serde(default)]
    pub antennas: Vec<AntennaDevice>,

    #[serde(default)]
    pub has_firewall: bool,
    #[serde(default)]
    pub firewall_brand: FirewallBrand,
    #[serde(default = "default_true")]
    pub firewall_working: bool,
    #[serde(default)]
    pub firewall_notes: String,

    // 3. 端末
    #[serde(default = "default_true")]
    pub all_machines_ok: bool,
    #[serde(default)]
    pub problematic_machines: Vec<ProblematicMachine>,

    // 4. ネットワークポイント
    #[serde(default = "default_true")]
    pub network_points_ok: bool,
    #[serde(default)]
    pub network_points_notes: String,

    // 5. 利用者満足度
    #[serde(default = "default_true")]
    pub employees_satisfied: bool,
    #[serde(default)]
    pub complaints: String,

    #[serde(default)]
    pub observations: String,
    #[serde(default)]
    pub technician_name: String,
}

fn default_true() -> bool {
    true
}

impl ChecklistRecord {
    /// 空のチェックリストを作成
    pub fn new(visit_date: DateTime<FixedOffset>) -> Self {
        Self {
            location_name: String::new(),
            responsible_name: String::new(),
            visit_date,
            cable_condition: CableCondition::Organized,
            cable_notes: String::new(),
            switches: Vec::new(),
            antennas: Vec::new(),
            has_firewall: false,
            firewall_brand: FirewallBrand::default(),
            firewall_working: true,
            firewall_notes: String::new(),
            all_machines_ok: true,
            problematic_machines: Vec::new(),
            network_points_ok: true,
            network_points_notes: String::new(),
            employees_satisfied: true,
            complaints: String::new(),
            observations: String::new(),
            technician_name: String::new(),
        }
    }

    /// 拠点名だけ入った新規チェックリスト
    pub fn for_location(location_name: impl Into<String>, visit_date: DateTime<FixedOffset>) -> Self {
        Self {
            location_name: location_name.into(),
            ..Self::new(visit_date)
        }
    }

    /// スイッチ台数合計（u64で集計）
    pub fn switch_count(&self) -> u64 {
        self.switches.iter().map(|s| u64::from(s.quantity)).sum()
    }

    /// アンテナ台数合計
    pub fn antenna_count(&self) -> u64 {
        self.antennas.iter().map(|a| u64::from(a.quantity)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_date() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-03-05T14:30:00-03:00").unwrap()
    }

    #[test]
    fn test_brand_parse_known_and_custom() {
        assert_eq!(AntennaBrand::parse("Aruba"), Brand::Known(AntennaVendor::Aruba));
        assert_eq!(
            AntennaBrand::parse("aruba"),
            Brand::Custom("aruba".to_string())
        );
        assert_eq!(
            FirewallBrand::parse("pfSense"),
            Brand::Custom("pfSense".to_string())
        );
        assert_eq!(FirewallBrand::default().as_str(), "Fortinet");
    }

    #[test]
    fn test_brand_serializes_as_plain_string() {
        let json = serde_json::to_string(&FirewallBrand::Known(FirewallVendor::SonicWall)).unwrap();
        assert_eq!(json, "\"SonicWall\"");
        let custom: FirewallBrand = serde_json::from_str("\"Mikrotik\"").unwrap();
        assert_eq!(custom, Brand::Custom("Mikrotik".to_string()));
    }

    #[test]
    fn test_cable_condition_wire_names() {
        let json = serde_json::to_string(&CableCondition::Disorganized).unwrap();
        assert_eq!(json, "\"Desorganizado\"");
        assert!(serde_json::from_str::<CableCondition>("\"Caótico\"").is_err());
    }

    #[test]
    fn test_record_reads_browser_json() {
        let json = r#"{
            "locationName": "CRT",
            "responsibleName": "",
            "visitDate": "2024-03-05T17:30:00.000Z",
            "cableCondition": "Parcial",
            "cableNotes": "",
            "switches": [{
                "id": "6f1c1c3e-8a53-4c61-9d0a-0d6f1f0f7f11",
                "quantity": 2, "brand": "TP-Link", "model": "T1600",
                "ports": 24, "conditionOk": true, "notes": ""
            }],
            "antennas": [],
            "hasFirewall": true,
            "firewallBrand": "SonicWall",
            "firewallWorking": false,
            "firewallNotes": "",
            "allMachinesOk": true,
            "problematicMachines": [],
            "networkPointsOk": true,
            "networkPointsNotes": "",
            "employeesSatisfied": true,
            "complaints": "",
            "observations": "",
            "technicianName": "Ana"
        }"#;
        let record: ChecklistRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.cable_condition, CableCondition::Partial);
        assert_eq!(record.switch_count(), 2);
        assert_eq!(record.firewall_brand, Brand::Known(FirewallVendor::SonicWall));
    }

    #[test]
    fn test_new_record_defaults() {
        let record = ChecklistRecord::for_location("CSC", sample_date());
        assert_eq!(record.location_name, "CSC");
        assert!(record.all_machines_ok);
        assert!(!record.has_firewall);
        assert_eq!(record.switch_count(), 0);
        assert_eq!(record.antenna_count(), 0);
    }

    #[test]
    fn test_counts_do_not_overflow() {
        let mut record = ChecklistRecord::for_location("CSC", sample_date());
        for _ in 0..2 {
            record.switches.push(SwitchDevice {
                quantity: 3_000_000_000,
                ..Default::default()
            });
            record.antennas.push(AntennaDevice {
                quantity: u32::MAX,
                ..Default::default()
            });
        }
        assert_eq!(record.switch_count(), 6_000_000_000);
        assert_eq!(record.antenna_count(), 2 * u64::from(u32::MAX));
    }
}
