//! チェックリスト操作コマンド
//!
//! 画面イベントの代わりに、スナップショットを受け取り新しいスナップショットを返す
//! 純粋関数として各操作を提供する。

use crate::error::{RequiredField, ValidationError};
use crate::types::{
    AntennaBrand, AntennaDevice, ChecklistRecord, FirewallBrand, FirewallVendor, ItemId,
    ProblematicMachine, SwitchDevice,
};
use chrono::{DateTime, FixedOffset};

/// 数量入力の正規化: 1未満・数値以外は1に丸める
pub fn clamp_quantity(raw: &str) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(value) if value > 0 => u32::try_from(value).unwrap_or(u32::MAX),
        _ => 1,
    }
}

/// スイッチの部分更新
#[derive(Debug, Clone, Default)]
pub struct SwitchPatch {
    pub quantity: Option<u32>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub ports: Option<u32>,
    pub condition_ok: Option<bool>,
    pub notes: Option<String>,
}

/// アンテナの部分更新
#[derive(Debug, Clone, Default)]
pub struct AntennaPatch {
    pub quantity: Option<u32>,
    pub brand: Option<AntennaBrand>,
    pub is_working: Option<bool>,
    pub notes: Option<String>,
}

/// 問題端末の部分更新
#[derive(Debug, Clone, Default)]
pub struct MachinePatch {
    pub identifier: Option<String>,
    pub processor_gen: Option<String>,
    pub os_updated: Option<bool>,
    pub problem_description: Option<String>,
}

/// ファイアウォールのブランド選択肢（「その他」を含む）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirewallChoice {
    Known(FirewallVendor),
    Other,
}

impl ChecklistRecord {
    /// 保存済みデータから再開（訪問日時は現在に更新）
    pub fn resume(self, now: DateTime<FixedOffset>) -> Self {
        Self {
            visit_date: now,
            ..self
        }
        .normalized()
    }

    /// 新しい空のチェックリストに置き換え
    pub fn reset(self, now: DateTime<FixedOffset>) -> Self {
        Self::new(now)
    }

    /// 外部から読み込んだデータの不変条件を整える
    pub fn normalized(mut self) -> Self {
        for sw in &mut self.switches {
            sw.quantity = sw.quantity.max(1);
            sw.ports = sw.ports.max(1);
        }
        for ant in &mut self.antennas {
            ant.quantity = ant.quantity.max(1);
        }
        if !self.all_machines_ok && self.problematic_machines.is_empty() {
            self.problematic_machines.push(ProblematicMachine::default());
        }
        self
    }

    // ---------- スイッチ ----------

    pub fn add_switch(self) -> Self {
        self.with_switch(SwitchDevice::default())
    }

    pub fn with_switch(mut self, device: SwitchDevice) -> Self {
        self.switches.push(SwitchDevice {
            quantity: device.quantity.max(1),
            ports: device.ports.max(1),
            ..device
        });
        self
    }

    pub fn update_switch(mut self, id: ItemId, patch: SwitchPatch) -> Self {
        if let Some(sw) = self.switches.iter_mut().find(|s| s.id == id) {
            if let Some(quantity) = patch.quantity {
                sw.quantity = quantity.max(1);
            }
            if let Some(brand) = patch.brand {
                sw.brand = brand;
            }
            if let Some(model) = patch.model {
                sw.model = model;
            }
            if let Some(ports) = patch.ports {
                sw.ports = ports.max(1);
            }
            if let Some(ok) = patch.condition_ok {
                sw.condition_ok = ok;
            }
            if let Some(notes) = patch.notes {
                sw.notes = notes;
            }
        }
        self
    }

    pub fn remove_switch(mut self, id: ItemId) -> Self {
        self.switches.retain(|s| s.id != id);
        self
    }

    // ---------- アンテナ ----------

    pub fn add_antenna(self) -> Self {
        self.with_antenna(AntennaDevice::default())
    }

    pub fn with_antenna(mut self, device: AntennaDevice) -> Self {
        self.antennas.push(AntennaDevice {
            quantity: device.quantity.max(1),
            ..device
        });
        self
    }

    pub fn update_antenna(mut self, id: ItemId, patch: AntennaPatch) -> Self {
        if let Some(ant) = self.antennas.iter_mut().find(|a| a.id == id) {
            if let Some(quantity) = patch.quantity {
                ant.quantity = quantity.max(1);
            }
            if let Some(brand) = patch.brand {
                ant.brand = brand;
            }
            if let Some(working) = patch.is_working {
                ant.is_working = working;
            }
            if let Some(notes) = patch.notes {
                ant.notes = notes;
            }
        }
        self
    }

    pub fn remove_antenna(mut self, id: ItemId) -> Self {
        self.antennas.retain(|a| a.id != id);
        self
    }

    // ---------- 端末 ----------

    pub fn add_machine(self) -> Self {
        self.with_machine(ProblematicMachine::default())
    }

    pub fn with_machine(mut self, machine: ProblematicMachine) -> Self {
        self.problematic_machines.push(machine);
        self
    }

    pub fn update_machine(mut self, id: ItemId, patch: MachinePatch) -> Self {
        if let Some(pm) = self.problematic_machines.iter_mut().find(|m| m.id == id) {
            if let Some(identifier) = patch.identifier {
                pm.identifier = identifier;
            }
            if let Some(gen) = patch.processor_gen {
                pm.processor_gen = gen;
            }
            if let Some(updated) = patch.os_updated {
                pm.os_updated = updated;
            }
            if let Some(description) = patch.problem_description {
                pm.problem_description = description;
            }
        }
        self
    }

    pub fn remove_machine(mut self, id: ItemId) -> Self {
        self.problematic_machines.retain(|m| m.id != id);
        self
    }

    /// 「全端末OK」の切替。falseにした時点で一覧が空なら1件追加する
    pub fn set_all_machines_ok(mut self, ok: bool) -> Self {
        self.all_machines_ok = ok;
        if !ok && self.problematic_machines.is_empty() {
            return self.add_machine();
        }
        self
    }

    // ---------- ファイアウォール ----------

    pub fn set_firewall_brand_choice(mut self, choice: FirewallChoice) -> Self {
        self.firewall_brand = match choice {
            FirewallChoice::Known(vendor) => FirewallBrand::Known(vendor),
            // 「その他」は入力を促すため空にする
            FirewallChoice::Other => FirewallBrand::Custom(String::new()),
        };
        self
    }

    /// 現在のブランドに対応する選択肢
    pub fn firewall_brand_choice(&self) -> FirewallChoice {
        match &self.firewall_brand {
            FirewallBrand::Known(vendor) => FirewallChoice::Known(*vendor),
            FirewallBrand::Custom(_) => FirewallChoice::Other,
        }
    }
}

/// レポート生成前の必須項目チェック
pub fn validate_for_report(record: &ChecklistRecord) -> Result<(), ValidationError> {
    let mut missing = Vec::new();
    if record.location_name.trim().is_empty() {
        missing.push(RequiredField::LocationName);
    }
    if record.technician_name.trim().is_empty() {
        missing.push(RequiredField::TechnicianName);
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AntennaVendor, Brand};

    fn sample_date() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-03-05T14:30:00-03:00").unwrap()
    }

    #[test]
    fn test_clamp_quantity() {
        assert_eq!(clamp_quantity("3"), 3);
        assert_eq!(clamp_quantity(" 12 "), 12);
        assert_eq!(clamp_quantity("0"), 1);
        assert_eq!(clamp_quantity("-4"), 1);
        assert_eq!(clamp_quantity(""), 1);
        assert_eq!(clamp_quantity("abc"), 1);
    }

    #[test]
    fn test_switch_add_update_remove() {
        let record = ChecklistRecord::new(sample_date()).add_switch().add_switch();
        assert_eq!(record.switches.len(), 2);
        assert_ne!(record.switches[0].id, record.switches[1].id);
        assert_eq!(record.switches[0].ports, 24);

        let first = record.switches[0].id;
        let record = record.update_switch(
            first,
            SwitchPatch {
                quantity: Some(0),
                brand: Some("Cisco".into()),
                ..Default::default()
            },
        );
        assert_eq!(record.switches[0].quantity, 1);
        assert_eq!(record.switches[0].brand, "Cisco");
        assert_eq!(record.switches[1].brand, "");

        let record = record.remove_switch(first);
        assert_eq!(record.switches.len(), 1);
        assert_ne!(record.switches[0].id, first);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let record = ChecklistRecord::new(sample_date()).add_antenna();
        let before = record.clone();
        let record = record.update_antenna(
            ItemId::new(),
            AntennaPatch {
                is_working: Some(false),
                ..Default::default()
            },
        );
        assert_eq!(record, before);
    }

    #[test]
    fn test_antenna_defaults_and_brand_patch() {
        let record = ChecklistRecord::new(sample_date()).add_antenna();
        assert_eq!(record.antennas[0].brand, Brand::Known(AntennaVendor::UniFi));
        let id = record.antennas[0].id;
        let record = record.update_antenna(
            id,
            AntennaPatch {
                brand: Some(AntennaBrand::parse("Ubiquiti AC")),
                ..Default::default()
            },
        );
        assert!(record.antennas[0].brand.is_custom());
    }

    #[test]
    fn test_machines_flag_auto_adds_one_entry() {
        let record = ChecklistRecord::new(sample_date()).set_all_machines_ok(false);
        assert!(!record.all_machines_ok);
        assert_eq!(record.problematic_machines.len(), 1);
        assert!(record.problematic_machines[0].os_updated);
        assert!(record.problematic_machines[0].identifier.is_empty());

        // 既に登録がある場合は追加しない
        let record = record.set_all_machines_ok(true).set_all_machines_ok(false);
        assert_eq!(record.problematic_machines.len(), 1);
    }

    #[test]
    fn test_firewall_other_choice_clears_brand() {
        let record = ChecklistRecord::new(sample_date())
            .set_firewall_brand_choice(FirewallChoice::Known(FirewallVendor::SonicWall));
        assert_eq!(record.firewall_brand.as_str(), "SonicWall");

        let record = record.set_firewall_brand_choice(FirewallChoice::Other);
        assert_eq!(record.firewall_brand, FirewallBrand::Custom(String::new()));
        assert_eq!(record.firewall_brand_choice(), FirewallChoice::Other);
    }

    #[test]
    fn test_resume_refreshes_visit_date() {
        let later = DateTime::parse_from_rfc3339("2024-06-01T09:00:00-03:00").unwrap();
        let saved = ChecklistRecord::for_location("CRC", sample_date()).add_switch();
        let resumed = saved.clone().resume(later);
        assert_eq!(resumed.visit_date, later);
        assert_eq!(resumed.switches, saved.switches);
    }

    #[test]
    fn test_normalized_enforces_invariants() {
        let mut record = ChecklistRecord::new(sample_date()).add_switch();
        record.switches[0].quantity = 0;
        record.all_machines_ok = false;
        let record = record.normalized();
        assert_eq!(record.switches[0].quantity, 1);
        assert_eq!(record.problematic_machines.len(), 1);
    }

    #[test]
    fn test_validate_for_report() {
        let record = ChecklistRecord::new(sample_date());
        let err = validate_for_report(&record).unwrap_err();
        assert_eq!(
            err.missing,
            vec![RequiredField::LocationName, RequiredField::TechnicianName]
        );

        let mut record = ChecklistRecord::for_location("CSC", sample_date());
        record.technician_name = "  ".into();
        let err = validate_for_report(&record).unwrap_err();
        assert_eq!(err.missing, vec![RequiredField::TechnicianName]);

        record.technician_name = "Carlos".into();
        assert!(validate_for_report(&record).is_ok());
    }
}
