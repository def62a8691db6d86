//! 対話式チェックリスト入力モジュール
//!
//! 画面の各セクションを dialoguer のプロンプトで順に埋める。
//! レコードの変更はすべて共通ライブラリの操作コマンド経由で行う。

use crate::error::{InfraCheckError, Result};
use dialoguer::{Confirm, Input, Select};
use infracheck_common::{
    clamp_quantity, AntennaBrand, AntennaPatch, AntennaVendor, Brand, CableCondition,
    ChecklistRecord, FirewallBrand, FirewallChoice, FirewallVendor, KnownBrand, LocationIndex,
    MachinePatch, SwitchPatch,
};

/// 候補一覧の最後に出す「入力した名前をそのまま使う」選択肢
const USE_TYPED: &str = "(usar o nome digitado)";
const OTHER_BRAND: &str = "Outro";

fn prompt_err(e: dialoguer::Error) -> InfraCheckError {
    InfraCheckError::Prompt(e.to_string())
}

fn text(prompt: &str, initial: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    Ok(value.trim().to_string())
}

fn required_text(prompt: &str, initial: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            if input.trim().is_empty() {
                Err("Campo obrigatório")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(prompt_err)?;
    Ok(value.trim().to_string())
}

fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(prompt_err)
}

fn select(prompt: &str, items: &[&str], default: usize) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()
        .map_err(prompt_err)
}

fn quantity(prompt: &str, current: u32) -> Result<u32> {
    let raw = text(prompt, &current.to_string())?;
    Ok(clamp_quantity(&raw))
}

/// 候補の選択肢: 候補一覧 + 入力値そのもの
pub fn location_choices(index: &LocationIndex, typed: &str) -> Vec<String> {
    let mut choices = index.suggest(typed);
    if !choices.iter().any(|c| c == typed) {
        choices.push(USE_TYPED.to_string());
    }
    choices
}

/// 選択結果を拠点名に解決
pub fn resolve_location_choice(choices: &[String], picked: usize, typed: &str) -> String {
    match choices.get(picked) {
        Some(choice) if choice != USE_TYPED => choice.clone(),
        _ => typed.to_string(),
    }
}

/// 拠点名の入力（候補から選択可）
pub fn prompt_location(index: &LocationIndex, initial: &str) -> Result<String> {
    loop {
        let typed = required_text("Nome do Local", initial)?;
        let choices = location_choices(index, &typed);
        if choices.len() == 1 {
            return Ok(resolve_location_choice(&choices, 0, &typed));
        }
        let items: Vec<&str> = choices.iter().map(String::as_str).collect();
        let picked = select("Sugestões", &items, 0)?;
        let name = resolve_location_choice(&choices, picked, &typed);
        if !name.is_empty() {
            return Ok(name);
        }
    }
}

fn prompt_brand<K: KnownBrand>(prompt: &str, current: &Brand<K>) -> Result<Brand<K>> {
    let mut items: Vec<&str> = K::ALL.iter().map(|k| k.name()).collect();
    items.push(OTHER_BRAND);
    let default = K::ALL
        .iter()
        .position(|k| current.as_str() == k.name())
        .unwrap_or(items.len() - 1);
    let picked = select(prompt, &items, default)?;
    match K::ALL.get(picked) {
        Some(known) => Ok(Brand::Known(*known)),
        None => {
            let initial = if current.is_custom() { current.as_str() } else { "" };
            let name = text("Qual marca?", initial)?;
            Ok(Brand::parse(&name))
        }
    }
}

/// 全セクションを対話的に入力し、新しいスナップショットを返す
pub fn run_checklist_form(record: ChecklistRecord, index: &LocationIndex) -> Result<ChecklistRecord> {
    let mut record = record;

    println!("== Dados da Visita ==");
    record.location_name = prompt_location(index, &record.location_name)?;
    record.responsible_name = text("Responsável Local", &record.responsible_name)?;
    record.technician_name = required_text("Técnico Responsável", &record.technician_name)?;

    println!("\n== 1. CPD / Infraestrutura ==");
    record = prompt_cabling(record)?;
    record = prompt_switches(record)?;
    record = prompt_antennas(record)?;
    record = prompt_firewall(record)?;

    println!("\n== 2. Máquinas ==");
    record = prompt_machines(record)?;

    println!("\n== 3. Pontos de Rede ==");
    record.network_points_ok = confirm("Pontos de rede em bom estado?", record.network_points_ok)?;
    record.network_points_notes = text("Observações sobre os pontos", &record.network_points_notes)?;

    println!("\n== 4. Satisfação ==");
    record.employees_satisfied = confirm("Os colaboradores estão satisfeitos?", record.employees_satisfied)?;
    if !record.employees_satisfied {
        record.complaints = text("Relato de reclamações", &record.complaints)?;
    }

    record.observations = text("Observações gerais", &record.observations)?;
    Ok(record)
}

fn prompt_cabling(mut record: ChecklistRecord) -> Result<ChecklistRecord> {
    let labels: Vec<&str> = CableCondition::ALL.iter().map(|c| c.label()).collect();
    let current = CableCondition::ALL
        .iter()
        .position(|c| *c == record.cable_condition)
        .unwrap_or(0);
    let picked = select("Organização dos cabos", &labels, current)?;
    record.cable_condition = CableCondition::ALL[picked];
    record.cable_notes = text("Observações sobre cabos", &record.cable_notes)?;
    Ok(record)
}

fn prompt_switches(mut record: ChecklistRecord) -> Result<ChecklistRecord> {
    if !record.switches.is_empty() {
        println!("{} switch(es) já registrados.", record.switches.len());
        if confirm("Limpar a lista de switches?", false)? {
            let ids: Vec<_> = record.switches.iter().map(|s| s.id).collect();
            for id in ids {
                record = record.remove_switch(id);
            }
        }
    }
    while confirm("Adicionar switch?", record.switches.is_empty())? {
        record = record.add_switch();
        let Some(current) = record.switches.last().cloned() else {
            break;
        };
        let patch = SwitchPatch {
            quantity: Some(quantity("Quantidade", current.quantity)?),
            brand: Some(text("Marca", &current.brand)?),
            model: Some(text("Modelo", &current.model)?),
            ports: Some(quantity("Portas", current.ports)?),
            condition_ok: Some(confirm("Condição OK?", current.condition_ok)?),
            notes: Some(text("Observações", &current.notes)?),
        };
        record = record.update_switch(current.id, patch);
    }
    Ok(record)
}

fn prompt_antennas(mut record: ChecklistRecord) -> Result<ChecklistRecord> {
    if !record.antennas.is_empty() {
        println!("{} antena(s) já registradas.", record.antennas.len());
        if confirm("Limpar a lista de antenas?", false)? {
            let ids: Vec<_> = record.antennas.iter().map(|a| a.id).collect();
            for id in ids {
                record = record.remove_antenna(id);
            }
        }
    }
    while confirm("Adicionar antena Wi-Fi?", record.antennas.is_empty())? {
        record = record.add_antenna();
        let Some(current) = record.antennas.last().cloned() else {
            break;
        };
        let brand: AntennaBrand = prompt_brand::<AntennaVendor>("Marca", &current.brand)?;
        let patch = AntennaPatch {
            quantity: Some(quantity("Quantidade", current.quantity)?),
            brand: Some(brand),
            is_working: Some(confirm("Funcionando?", current.is_working)?),
            notes: Some(text("Observações", &current.notes)?),
        };
        record = record.update_antenna(current.id, patch);
    }
    Ok(record)
}

fn prompt_firewall(mut record: ChecklistRecord) -> Result<ChecklistRecord> {
    record.has_firewall = confirm("Existe firewall?", record.has_firewall)?;
    if !record.has_firewall {
        return Ok(record);
    }

    let mut items: Vec<&str> = FirewallVendor::ALL.iter().map(|v| v.name()).collect();
    items.push(OTHER_BRAND);
    let default = match record.firewall_brand_choice() {
        FirewallChoice::Known(vendor) => FirewallVendor::ALL
            .iter()
            .position(|v| *v == vendor)
            .unwrap_or(0),
        FirewallChoice::Other => items.len() - 1,
    };
    let picked = select("Marca do firewall", &items, default)?;
    match FirewallVendor::ALL.get(picked) {
        Some(vendor) => {
            record = record.set_firewall_brand_choice(FirewallChoice::Known(*vendor));
        }
        None => {
            let previous = record.firewall_brand.clone();
            record = record.set_firewall_brand_choice(FirewallChoice::Other);
            let initial = if previous.is_custom() { previous.as_str() } else { "" };
            let name = text("Qual marca?", initial)?;
            record.firewall_brand = FirewallBrand::parse(&name);
        }
    }
    record.firewall_working = confirm("Funcionando normalmente?", record.firewall_working)?;
    record.firewall_notes = text("Observações", &record.firewall_notes)?;
    Ok(record)
}

fn prompt_machines(mut record: ChecklistRecord) -> Result<ChecklistRecord> {
    let all_ok = confirm("Todas as máquinas estão OK?", record.all_machines_ok)?;
    record = record.set_all_machines_ok(all_ok);
    if all_ok {
        return Ok(record);
    }

    let mut index = 0;
    loop {
        if index >= record.problematic_machines.len() {
            if !confirm("Adicionar outra máquina?", false)? {
                break;
            }
            record = record.add_machine();
        }
        let current = record.problematic_machines[index].clone();
        println!("-- Máquina #{} --", index + 1);
        if !current.identifier.is_empty() && confirm("Remover esta máquina?", false)? {
            record = record.remove_machine(current.id);
            continue;
        }
        let patch = MachinePatch {
            identifier: Some(text("Identificação", &current.identifier)?),
            processor_gen: Some(text("Geração do processador", &current.processor_gen)?),
            os_updated: Some(confirm("Windows 11 atualizado?", current.os_updated)?),
            problem_description: Some(text("Descrição do problema", &current.problem_description)?),
        };
        record = record.update_machine(current.id, patch);
        index += 1;
    }
    // 全件削除された場合も一覧を空にしない
    Ok(record.normalized())
}
