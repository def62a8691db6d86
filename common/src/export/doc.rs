//! Word互換（HTML形式 .doc）のレポート
//!
//! Wordで開けるHTMLを生成する。ユーザー入力はすべてHTMLエスケープする。

use super::{bool_to_text, format_date_time, or_default};
use crate::types::ChecklistRecord;
use std::fmt::Write;

const STYLES: &str = r#"
    body { font-family: 'Arial', sans-serif; font-size: 11pt; line-height: 1.5; color: #333; }
    .header { text-align: center; margin-bottom: 30px; border-bottom: 2px solid #333; padding-bottom: 10px; }
    h1 { font-size: 18pt; color: #000; margin: 0; text-transform: uppercase; }
    h2 { font-size: 14pt; color: #1f4e79; border-bottom: 1px solid #ccc; margin-top: 25px; padding-bottom: 5px; }
    h3 { font-size: 12pt; font-weight: bold; margin-top: 15px; color: #444; }
    .meta-table { width: 100%; margin-bottom: 20px; }
    .meta-table td { padding: 5px; vertical-align: top; }
    .label { font-weight: bold; color: #555; }
    table.data-table { width: 100%; border-collapse: collapse; margin-top: 10px; font-size: 10pt; }
    table.data-table th { background-color: #f2f2f2; border: 1px solid #999; padding: 8px; text-align: left; }
    table.data-table td { border: 1px solid #ccc; padding: 8px; }
    .conclusion-box { background-color: #f9f9f9; border: 1px solid #e0e0e0; padding: 15px; margin-top: 10px; }
    .footer { margin-top: 60px; page-break-inside: avoid; }
    .signature-line { border-top: 1px solid #000; width: 60%; margin-top: 50px; padding-top: 5px; }
    .stamp-box { border: 1px dashed #999; width: 200px; height: 100px; margin-top: 30px; padding: 10px; text-align: center; color: #999; }
"#;

/// HTML特殊文字をエスケープ
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Word互換HTMLを生成
pub fn render_doc(record: &ChecklistRecord, conclusion: &str) -> String {
    let mut out = String::new();
    // String への書き込みは失敗しない
    let _ = write_document(&mut out, record, conclusion);
    out
}

/// データ表（見出し行 + 本文行）
fn write_table(out: &mut String, headers: &[&str], rows: &[Vec<String>]) -> std::fmt::Result {
    writeln!(out, "      <table class=\"data-table\">")?;
    write!(out, "        <thead><tr>")?;
    for header in headers {
        write!(out, "<th>{}</th>", header)?;
    }
    writeln!(out, "</tr></thead>")?;
    writeln!(out, "        <tbody>")?;
    for row in rows {
        write!(out, "        <tr>")?;
        for cell in row {
            write!(out, "<td>{}</td>", cell)?;
        }
        writeln!(out, "</tr>")?;
    }
    writeln!(out, "        </tbody>")?;
    writeln!(out, "      </table>")
}

fn write_document(out: &mut String, data: &ChecklistRecord, conclusion: &str) -> std::fmt::Result {
    let e = escape_html;

    writeln!(
        out,
        "<html xmlns:o='urn:schemas-microsoft-com:office:office' xmlns:w='urn:schemas-microsoft-com:office:word' xmlns='http://www.w3.org/TR/REC-html40'>"
    )?;
    writeln!(out, "<head><meta charset='utf-8'><title>Relatório</title>")?;
    writeln!(out, "<style>{}</style>", STYLES)?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "  <div class=\"header\">")?;
    writeln!(out, "    <h1>Relatório de Checklist</h1>")?;
    writeln!(out, "    <p style=\"margin:5px 0 0 0; font-size: 12pt;\">Infraestrutura de TI</p>")?;
    writeln!(out, "  </div>")?;

    // 訪問情報
    writeln!(out, "  <table class=\"meta-table\">")?;
    writeln!(
        out,
        "    <tr><td width=\"20%\"><span class=\"label\">Local:</span></td><td width=\"80%\"><strong>{}</strong></td></tr>",
        e(&data.location_name)
    )?;
    writeln!(
        out,
        "    <tr><td><span class=\"label\">Data/Hora:</span></td><td>{}</td></tr>",
        format_date_time(&data.visit_date)
    )?;
    writeln!(
        out,
        "    <tr><td><span class=\"label\">Responsável Local:</span></td><td>{}</td></tr>",
        e(&data.responsible_name)
    )?;
    writeln!(
        out,
        "    <tr><td><span class=\"label\">Técnico:</span></td><td>{}</td></tr>",
        e(&data.technician_name)
    )?;
    writeln!(out, "  </table>")?;

    // 1. サーバ室
    writeln!(out, "  <h2>1. CPD / Infraestrutura</h2>")?;
    writeln!(
        out,
        "  <p><span class=\"label\">Organização dos Cabos:</span> {}</p>",
        data.cable_condition
    )?;
    if !data.cable_notes.is_empty() {
        writeln!(out, "  <p><em>Obs: {}</em></p>", e(&data.cable_notes))?;
    }

    writeln!(out, "  <h3>Switches de Rede</h3>")?;
    if data.switches.is_empty() {
        writeln!(out, "  <p>Nenhum switch registrado.</p>")?;
    } else {
        let rows: Vec<Vec<String>> = data
            .switches
            .iter()
            .enumerate()
            .map(|(idx, s)| {
                vec![
                    (idx + 1).to_string(),
                    s.quantity.to_string(),
                    format!("{} {}", e(&s.brand), e(&s.model)),
                    s.ports.to_string(),
                    if s.condition_ok { "OK" } else { "Falha" }.to_string(),
                    e(or_default(&s.notes, "-")),
                ]
            })
            .collect();
        write_table(
            out,
            &["#", "Qtd", "Equipamento", "Portas", "Condição", "Observações"],
            &rows,
        )?;
    }

    writeln!(out, "  <h3>Antenas Wi-Fi</h3>")?;
    if data.antennas.is_empty() {
        writeln!(out, "  <p>Nenhuma antena registrada.</p>")?;
    } else {
        let rows: Vec<Vec<String>> = data
            .antennas
            .iter()
            .enumerate()
            .map(|(idx, a)| {
                vec![
                    (idx + 1).to_string(),
                    a.quantity.to_string(),
                    e(a.brand.as_str()),
                    if a.is_working { "Funcionando" } else { "Falha" }.to_string(),
                    e(or_default(&a.notes, "-")),
                ]
            })
            .collect();
        write_table(out, &["#", "Qtd", "Marca", "Status", "Observações"], &rows)?;
    }

    writeln!(out, "  <h3>Firewall</h3>")?;
    writeln!(
        out,
        "  <p><strong>Existe Firewall?</strong> {}</p>",
        bool_to_text(data.has_firewall)
    )?;
    if data.has_firewall {
        writeln!(out, "  <ul>")?;
        writeln!(out, "    <li><strong>Marca:</strong> {}</li>", e(data.firewall_brand.as_str()))?;
        writeln!(
            out,
            "    <li><strong>Status:</strong> {}</li>",
            if data.firewall_working { "Operacional" } else { "Com Falha" }
        )?;
        writeln!(
            out,
            "    <li><strong>Obs:</strong> {}</li>",
            e(or_default(&data.firewall_notes, "-"))
        )?;
        writeln!(out, "  </ul>")?;
    }

    // 2. 端末
    writeln!(out, "  <h2>2. Máquinas e Computadores</h2>")?;
    writeln!(
        out,
        "  <p><strong>Status Geral:</strong> {}</p>",
        if data.all_machines_ok {
            "Todas as máquinas estão em perfeito estado."
        } else {
            "Foram identificadas máquinas com problemas."
        }
    )?;
    if !data.all_machines_ok {
        let rows: Vec<Vec<String>> = data
            .problematic_machines
            .iter()
            .enumerate()
            .map(|(idx, m)| {
                vec![
                    (idx + 1).to_string(),
                    e(&m.identifier),
                    e(&m.processor_gen),
                    bool_to_text(m.os_updated).to_string(),
                    format!(
                        "<span style=\"color:#cc0000\">{}</span>",
                        e(&m.problem_description)
                    ),
                ]
            })
            .collect();
        write_table(
            out,
            &["#", "ID", "Processador", "Windows 11", "Descrição do Problema"],
            &rows,
        )?;
    }

    // 3. ネットワークポイント
    writeln!(out, "  <h2>3. Pontos de Rede</h2>")?;
    writeln!(
        out,
        "  <p><strong>Estado Físico/Funcional:</strong> {}</p>",
        if data.network_points_ok { "Bons" } else { "Apresentam problemas" }
    )?;
    writeln!(
        out,
        "  <p><em>Obs: {}</em></p>",
        e(or_default(&data.network_points_notes, "Nenhuma observação."))
    )?;

    // 4. 満足度
    writeln!(out, "  <h2>4. Satisfação dos Usuários</h2>")?;
    writeln!(
        out,
        "  <p><strong>Satisfação Geral:</strong> {}</p>",
        if data.employees_satisfied {
            "Sim, satisfeitos."
        } else {
            "Não, há reclamações."
        }
    )?;
    if !data.employees_satisfied {
        writeln!(
            out,
            "  <p style=\"background-color:#fff0f0; padding:10px; border:1px solid #ffcccc;\"><strong>Reclamações:</strong> {}</p>",
            e(&data.complaints)
        )?;
    }

    // 5. 結論
    writeln!(out, "  <h2>5. Conclusão e Observações</h2>")?;
    if !data.observations.is_empty() {
        writeln!(
            out,
            "  <p><strong>Observações Gerais:</strong> {}</p>",
            e(&data.observations)
        )?;
    }
    writeln!(out, "  <div class=\"conclusion-box\">")?;
    writeln!(out, "    <h3>Resumo Técnico</h3>")?;
    writeln!(out, "    <p>{}</p>", e(conclusion))?;
    writeln!(out, "  </div>")?;

    // 署名欄
    writeln!(out, "  <div class=\"footer\">")?;
    writeln!(out, "    <div class=\"signature-line\">")?;
    writeln!(out, "      <strong>{}</strong><br>", e(&data.technician_name))?;
    writeln!(out, "      Técnico Responsável")?;
    writeln!(out, "    </div>")?;
    writeln!(out, "    <div class=\"stamp-box\">")?;
    writeln!(out, "      <br><br>")?;
    writeln!(out, "      <center>[ Espaço para Carimbo ]</center>")?;
    writeln!(out, "    </div>")?;
    writeln!(out, "  </div>")?;
    writeln!(out, "</body></html>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AntennaDevice, FirewallBrand};
    use chrono::DateTime;

    fn sample_record() -> ChecklistRecord {
        let date = DateTime::parse_from_rfc3339("2024-03-05T14:30:00-03:00").unwrap();
        let mut record = ChecklistRecord::for_location("CRT <Galpão>", date);
        record.technician_name = "Ana & Bia".into();
        record
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>\"x\" & 'y'</b>"), "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;");
    }

    #[test]
    fn test_document_is_written_to_the_end() {
        let html = render_doc(&sample_record(), "Conclusão.");
        assert!(html.starts_with("<html xmlns:o="));
        assert!(html.ends_with("</body></html>\n"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let html = render_doc(&sample_record(), "Conclusão <final>");
        assert!(html.contains("<strong>CRT &lt;Galpão&gt;</strong>"));
        assert!(html.contains("<strong>Ana &amp; Bia</strong><br>"));
        assert!(html.contains("<p>Conclusão &lt;final&gt;</p>"));
    }

    #[test]
    fn test_placeholders_and_firewall_block() {
        let mut record = sample_record();
        let html = render_doc(&record, "");
        assert!(html.contains("<p>Nenhum switch registrado.</p>"));
        assert!(html.contains("<p>Nenhuma antena registrada.</p>"));
        assert!(html.contains("<strong>Existe Firewall?</strong> Não"));
        assert!(!html.contains("<strong>Marca:</strong>"));

        record.has_firewall = true;
        record.firewall_brand = FirewallBrand::Custom("pfSense".into());
        record.firewall_working = false;
        let html = render_doc(&record, "");
        assert!(html.contains("<li><strong>Marca:</strong> pfSense</li>"));
        assert!(html.contains("<li><strong>Status:</strong> Com Falha</li>"));
    }

    #[test]
    fn test_antenna_table_rows_in_order() {
        let record = sample_record()
            .with_antenna(AntennaDevice {
                quantity: 3,
                ..Default::default()
            })
            .with_antenna(AntennaDevice {
                quantity: 1,
                is_working: false,
                notes: "sala 2".into(),
                ..Default::default()
            });
        let html = render_doc(&record, "");
        let first = html.find("<tr><td>1</td><td>3</td><td>UniFi</td><td>Funcionando</td><td>-</td></tr>").unwrap();
        let second = html.find("<tr><td>2</td><td>1</td><td>UniFi</td><td>Falha</td><td>sala 2</td></tr>").unwrap();
        assert!(first < second);
    }
}
