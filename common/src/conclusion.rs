//! 技術所見（結論文）の自動生成
//!
//! チェックリストから決定的に文章を組み立てる。副作用なし。
//! 1回のレポート出力につき1度だけ呼び出し、全形式で同じ文面を使うこと。

use crate::export::format_date;
use crate::types::{CableCondition, ChecklistRecord};

const ISSUE_MACHINES: &str = "estações de trabalho com anomalias de hardware ou software";
const ISSUE_NETWORK_POINTS: &str = "pontos de rede física danificados ou inoperantes";
const ISSUE_SATISFACTION: &str = "insatisfação reportada pelos usuários quanto aos serviços";

const NO_FIREWALL_WARNING: &str = "CRÍTICO: Não foi identificado firewall de borda dedicado no local, o que representa risco à segurança da rede. ";
const ISSUES_LEAD_IN: &str =
    "Foram diagnosticados os seguintes pontos de atenção que requerem plano de ação: ";
const ALL_GOOD_CLOSING: &str =
    "De modo geral, a infraestrutura avaliada apresenta estabilidade e boas condições de uso. ";

/// 結論文の元になる集計値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConclusionSummary {
    pub switch_count: u64,
    pub antenna_count: u64,
    /// 要対応事項（端末 → ネットワークポイント → 満足度の固定順）
    pub issues: Vec<&'static str>,
}

impl ConclusionSummary {
    pub fn from_record(record: &ChecklistRecord) -> Self {
        let mut issues = Vec::new();
        if !record.all_machines_ok {
            issues.push(ISSUE_MACHINES);
        }
        if !record.network_points_ok {
            issues.push(ISSUE_NETWORK_POINTS);
        }
        if !record.employees_satisfied {
            issues.push(ISSUE_SATISFACTION);
        }

        Self {
            switch_count: record.switch_count(),
            antenna_count: record.antenna_count(),
            issues,
        }
    }
}

fn cable_sentence(condition: CableCondition) -> &'static str {
    match condition {
        CableCondition::Disorganized => "A organização do cabeamento estruturado encontra-se crítica (Desorganizada), necessitando de intervenção. ",
        CableCondition::Partial => "A organização dos cabos apresenta pontos de melhoria (Parcial). ",
        CableCondition::Organized => "O cabeamento estruturado encontra-se devidamente organizado. ",
    }
}

/// 結論文を生成
pub fn generate_conclusion(record: &ChecklistRecord) -> String {
    let summary = ConclusionSummary::from_record(record);

    let mut text = format!(
        "A visita técnica realizada em {} ao local \"{}\" ",
        format_date(&record.visit_date),
        record.location_name
    );
    text.push_str(&format!(
        "identificou uma infraestrutura composta por {} switch(es) de rede e {} antena(s) Wi-Fi. ",
        summary.switch_count, summary.antenna_count
    ));

    text.push_str(cable_sentence(record.cable_condition));

    if record.has_firewall {
        let status = if record.firewall_working {
            "operacional"
        } else {
            "com falhas registradas"
        };
        text.push_str(&format!(
            "A segurança perimetral é gerida por firewall {}, estando atualmente {}. ",
            record.firewall_brand, status
        ));
    } else {
        text.push_str(NO_FIREWALL_WARNING);
    }

    if summary.issues.is_empty() {
        text.push_str(ALL_GOOD_CLOSING);
    } else {
        text.push_str(ISSUES_LEAD_IN);
        text.push_str(&summary.issues.join(", "));
        text.push_str(". ");
    }

    text
}
