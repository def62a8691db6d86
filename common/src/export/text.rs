//! プレーンテキスト形式のレポート

use super::{bool_to_text, format_date_time, or_default};
use crate::types::ChecklistRecord;
use std::fmt::Write;

const RULE_DOUBLE: &str = "================================================================";
const RULE_SINGLE: &str = "----------------------------------------------------------------";
const SIGNATURE_LINE: &str = "___________________________________________________";

/// テキストレポートを生成
pub fn render_text(record: &ChecklistRecord, conclusion: &str) -> String {
    let mut out = String::new();
    // String への書き込みは失敗しない
    let _ = write_report(&mut out, record, conclusion);
    out
}

fn section(out: &mut String, title: &str) -> std::fmt::Result {
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", RULE_SINGLE)
}

fn write_report(out: &mut String, data: &ChecklistRecord, conclusion: &str) -> std::fmt::Result {
    writeln!(out, "{}", RULE_DOUBLE)?;
    writeln!(out, "           RELATÓRIO DE CHECKLIST - INFRAESTRUTURA DE TI        ")?;
    writeln!(out, "{}\n", RULE_DOUBLE)?;

    section(out, "DADOS DA VISITA")?;
    writeln!(out, "Local:                 {}", data.location_name)?;
    writeln!(out, "Data e Hora:           {}", format_date_time(&data.visit_date))?;
    writeln!(out, "Responsável Local:     {}", or_default(&data.responsible_name, "Não informado"))?;
    writeln!(out, "Técnico Responsável:   {}\n", data.technician_name)?;

    section(out, "1. CPD / INFRAESTRUTURA DE REDE")?;
    writeln!(out, "[ Cabos ]")?;
    writeln!(out, "  - Organização: {}", data.cable_condition)?;
    writeln!(out, "  - Observações: {}\n", or_default(&data.cable_notes, "Nenhuma"))?;

    writeln!(out, "[ Switches de Rede ]")?;
    if data.switches.is_empty() {
        writeln!(out, "  - Nenhum switch registrado.")?;
    } else {
        for (idx, sw) in data.switches.iter().enumerate() {
            writeln!(out, "  Item {}:", idx + 1)?;
            writeln!(out, "    - Quantidade: {}", sw.quantity)?;
            writeln!(out, "    - Equipamento: {} {}", sw.brand, sw.model)?;
            writeln!(out, "    - Portas: {}", sw.ports)?;
            writeln!(out, "    - Condição: {}", if sw.condition_ok { "OK" } else { "DEFEITO" })?;
            if !sw.notes.is_empty() {
                writeln!(out, "    - Obs: {}", sw.notes)?;
            }
        }
    }
    writeln!(out)?;

    writeln!(out, "[ Antenas Wi-Fi ]")?;
    if data.antennas.is_empty() {
        writeln!(out, "  - Nenhuma antena registrada.")?;
    } else {
        for (idx, ant) in data.antennas.iter().enumerate() {
            writeln!(out, "  Item {}:", idx + 1)?;
            writeln!(out, "    - Quantidade: {}", ant.quantity)?;
            writeln!(out, "    - Marca: {}", ant.brand)?;
            writeln!(out, "    - Funcionando: {}", bool_to_text(ant.is_working))?;
            if !ant.notes.is_empty() {
                writeln!(out, "    - Obs: {}", ant.notes)?;
            }
        }
    }
    writeln!(out)?;

    writeln!(out, "[ Firewall ]")?;
    writeln!(out, "  - Existe Firewall: {}", bool_to_text(data.has_firewall))?;
    if data.has_firewall {
        writeln!(out, "  - Marca: {}", data.firewall_brand)?;
        let status = if data.firewall_working {
            "Funcionando Normalmente"
        } else {
            "Apresentando Falhas"
        };
        writeln!(out, "  - Status: {}", status)?;
        writeln!(out, "  - Obs: {}", or_default(&data.firewall_notes, "-"))?;
    }
    writeln!(out)?;

    section(out, "2. ESTAÇÕES DE TRABALHO (MÁQUINAS)")?;
    let machines_status = if data.all_machines_ok {
        "Todas as máquinas estão operacionais."
    } else {
        "Foram encontrados problemas."
    };
    writeln!(out, "  - Status Geral: {}", machines_status)?;
    if !data.all_machines_ok {
        for (idx, pm) in data.problematic_machines.iter().enumerate() {
            writeln!(out, "\n  [ Máquina com Problema #{} ]", idx + 1)?;
            writeln!(out, "    - ID: {}", pm.identifier)?;
            writeln!(out, "    - Processador: {}", pm.processor_gen)?;
            writeln!(out, "    - Windows 11 Atualizado: {}", bool_to_text(pm.os_updated))?;
            writeln!(out, "    - Descrição do Problema: {}", pm.problem_description)?;
        }
    }
    writeln!(out)?;

    section(out, "3. PONTOS DE REDE FÍSICA")?;
    let points_status = if data.network_points_ok {
        "Em perfeito estado"
    } else {
        "Necessitam reparos"
    };
    writeln!(out, "  - Estado dos Pontos: {}", points_status)?;
    writeln!(out, "  - Observações: {}\n", or_default(&data.network_points_notes, "Nenhuma"))?;

    section(out, "4. SATISFAÇÃO DOS USUÁRIOS")?;
    writeln!(
        out,
        "  - Os colaboradores estão satisfeitos? {}",
        bool_to_text(data.employees_satisfied)
    )?;
    if !data.employees_satisfied {
        writeln!(out, "  - Relato de Reclamações: {}", data.complaints)?;
    }
    writeln!(out)?;

    section(out, "5. CONCLUSÃO TÉCNICA")?;
    write!(out, "{}", conclusion)?;
    write!(out, "\n\n")?;

    if !data.observations.is_empty() {
        section(out, "OBSERVAÇÕES GERAIS")?;
        writeln!(out, "{}\n", data.observations)?;
    }

    write!(out, "\n\n")?;
    writeln!(out, "{}", SIGNATURE_LINE)?;
    writeln!(out, "Assinatura do Técnico Responsável: {}\n\n", data.technician_name)?;
    writeln!(out, "{}", SIGNATURE_LINE)?;
    writeln!(out, "[ Espaço para Carimbo ]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProblematicMachine, SwitchDevice};
    use chrono::DateTime;

    fn sample_record() -> ChecklistRecord {
        let date = DateTime::parse_from_rfc3339("2024-03-05T14:30:00-03:00").unwrap();
        let mut record = ChecklistRecord::for_location("CRT", date);
        record.technician_name = "Ana Souza".into();
        record
    }

    #[test]
    fn test_empty_lists_show_placeholders() {
        let text = render_text(&sample_record(), "Conclusão.");
        assert!(text.contains("  - Nenhum switch registrado.\n"));
        assert!(text.contains("  - Nenhuma antena registrada.\n"));
        assert!(text.contains("Responsável Local:     Não informado\n"));
        assert!(text.contains("Data e Hora:           05/03/2024, 14:30:00\n"));
        assert!(!text.contains("OBSERVAÇÕES GERAIS"));
        assert!(text.ends_with("[ Espaço para Carimbo ]\n"));
    }

    #[test]
    fn test_items_are_numbered_in_entry_order() {
        let record = sample_record()
            .with_switch(SwitchDevice {
                brand: "Cisco".into(),
                model: "SG350".into(),
                notes: "rack 1".into(),
                ..Default::default()
            })
            .with_switch(SwitchDevice {
                brand: "TP-Link".into(),
                model: "T1600".into(),
                condition_ok: false,
                ..Default::default()
            });
        let text = render_text(&record, "");
        let first = text.find("  Item 1:\n    - Quantidade: 1\n    - Equipamento: Cisco SG350").unwrap();
        let second = text.find("  Item 2:\n    - Quantidade: 1\n    - Equipamento: TP-Link T1600").unwrap();
        assert!(first < second);
        assert!(text.contains("    - Obs: rack 1\n"));
        assert!(text.contains("    - Condição: DEFEITO\n"));
    }

    #[test]
    fn test_conditional_sections() {
        let mut record = sample_record().with_machine(ProblematicMachine {
            identifier: "PC-07".into(),
            processor_gen: "i5 8ª".into(),
            os_updated: false,
            problem_description: "Lento".into(),
            ..Default::default()
        });
        record.all_machines_ok = false;
        record.employees_satisfied = false;
        record.complaints = "Wi-Fi cai".into();
        record.observations = "Retornar em 30 dias".into();

        let text = render_text(&record, "Resumo. ");
        assert!(text.contains("  [ Máquina com Problema #1 ]\n    - ID: PC-07\n"));
        assert!(text.contains("    - Windows 11 Atualizado: Não\n"));
        assert!(text.contains("  - Relato de Reclamações: Wi-Fi cai\n"));
        assert!(text.contains("5. CONCLUSÃO TÉCNICA\n"));
        assert!(text.contains("Resumo. \n\n"));
        assert!(text.contains("OBSERVAÇÕES GERAIS\n"));
        assert!(text.contains("Assinatura do Técnico Responsável: Ana Souza\n"));
        // 全端末OKの場合は端末一覧を出さない
        record.all_machines_ok = true;
        assert!(!render_text(&record, "").contains("PC-07"));
    }
}
