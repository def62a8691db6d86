//! 拠点名サジェスト
//!
//! 固定の拠点一覧 + ユーザーが入力した拠点（追記のみ）から候補を返す。

use std::collections::HashSet;

/// 既定の拠点一覧
pub const BASELINE_LOCATIONS: &[&str] = &[
    "Volkswagen T7", "Toyota T7", "RAM Castelo Branco", "Marketing", "Compliance Galpão",
    "Primeira Mão T7", "Primeira Mão Off Road T7", "BYD Marista",
    "Tudo Chevrolet Mutirão", "Nissan 85", "Primeira Mão 85",
    "BMW Carros", "CRT", "Jeep / RAM BR", "Triumph", "BMW Motos",
    "Seminovos Motos", "Tudo Chevrolet Buriti", "Toyota Buriti",
    "Primeira Mão Buriti", "Hyundai T9", "Jeep T9", "BYD Cidade Jardim",
    "Hyundai Cidade Jardim", "Primeira Mão Cidade Jardim", "Outlet Shopping",
    "Primeira Mão Shopping", "Toyota Anapolis", "Hyundai Anapolis",
    "Primeira Mão Anapolis", "Jeep / RAM Anapolis", "Nissan Anapolis",
    "Fazendinha", "Primeira Mão Galpão", "Primeira Mão Digital Galpão",
    "Corretora", "Seguros", "CSC", "DP", "Contabilidade", "Controladoria",
    "Administrativo", "Diretoria", "Auditoria Galpão", "Compras Galpão",
    "RH Galpão", "Compras CRT", "CRT Galpão", "Marketing BYD",
    "CRM T.I", "Compliance Galpão", "CRC",
];

/// 登録対象とする最小文字数（これより長いこと）
const MIN_CUSTOM_LEN: usize = 1;

/// 拠点サジェストインデックス
#[derive(Debug, Clone)]
pub struct LocationIndex {
    baseline: &'static [&'static str],
    custom: Vec<String>,
}

impl Default for LocationIndex {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl LocationIndex {
    pub fn new(custom: Vec<String>) -> Self {
        Self {
            baseline: BASELINE_LOCATIONS,
            custom,
        }
    }

    /// ユーザー登録済みの拠点
    pub fn custom(&self) -> &[String] {
        &self.custom
    }

    /// 既定 + ユーザー登録を重複除去して列挙（出現順）
    pub fn all(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.baseline
            .iter()
            .map(|s| s.to_string())
            .chain(self.custom.iter().cloned())
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.baseline.contains(&name) || self.custom.iter().any(|c| c == name)
    }

    /// 部分一致で候補を返す（前方一致を優先、次にアルファベット順）
    pub fn suggest(&self, query: &str) -> Vec<String> {
        if query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();

        let mut matches: Vec<String> = self
            .all()
            .into_iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .collect();

        matches.sort_by(|a, b| {
            let a_lower = a.to_lowercase();
            let b_lower = b.to_lowercase();
            let a_starts = a_lower.starts_with(&needle);
            let b_starts = b_lower.starts_with(&needle);
            b_starts
                .cmp(&a_starts)
                .then_with(|| a_lower.cmp(&b_lower))
                .then_with(|| a.cmp(b))
        });
        matches
    }

    /// 未知の拠点名を登録。登録した場合true
    pub fn learn(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.chars().count() <= MIN_CUSTOM_LEN || self.contains(trimmed) {
            return false;
        }
        self.custom.push(trimmed.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_returns_nothing() {
        let index = LocationIndex::default();
        assert!(index.suggest("").is_empty());
    }

    #[test]
    fn test_prefix_matches_come_first() {
        let index = LocationIndex::default();
        let suggestions = index.suggest("crt");
        assert_eq!(suggestions[0], "CRT");
        assert_eq!(suggestions[1], "CRT Galpão");
        assert!(suggestions.contains(&"Compras CRT".to_string()));
        let pos = suggestions.iter().position(|s| s == "Compras CRT").unwrap();
        assert!(pos > 1);
    }

    #[test]
    fn test_duplicates_are_removed() {
        let index = LocationIndex::new(vec!["CSC".to_string()]);
        let suggestions = index.suggest("Compliance");
        assert_eq!(suggestions, vec!["Compliance Galpão".to_string()]);
        assert_eq!(index.suggest("CSC"), vec!["CSC".to_string()]);
    }

    #[test]
    fn test_learn_rules() {
        let mut index = LocationIndex::default();
        assert!(!index.learn("X"));
        assert!(!index.learn("  "));
        assert!(!index.learn("CRT"));
        assert!(index.learn("  Filial Goiânia  "));
        assert!(!index.learn("Filial Goiânia"));
        assert_eq!(index.custom(), &["Filial Goiânia".to_string()]);
        assert_eq!(index.suggest("goi"), vec!["Filial Goiânia".to_string()]);
    }
}
