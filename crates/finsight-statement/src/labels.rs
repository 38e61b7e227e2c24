//! Soft mapping of free-text labels to statement roles.
//!
//! A label plays a role when it contains one of the role's needles,
//! compared case-insensitively. The first matching row wins.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    TotalAssets,
    ShortTermAssets,
    ShortTermLiabilities,
    /// Any aggregate row; excluded from composition charts.
    TotalRow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelKeys {
    #[serde(default = "default_total_assets")]
    pub total_assets: Vec<String>,
    #[serde(default = "default_short_term_assets")]
    pub short_term_assets: Vec<String>,
    #[serde(default = "default_short_term_liabilities")]
    pub short_term_liabilities: Vec<String>,
    #[serde(default = "default_total_rows")]
    pub total_rows: Vec<String>,
}

fn default_total_assets() -> Vec<String> {
    vec!["TOTAL ASSETS".to_string(), "TỔNG CỘNG TÀI SẢN".to_string()]
}
fn default_short_term_assets() -> Vec<String> {
    vec!["SHORT-TERM ASSETS".to_string(), "TÀI SẢN NGẮN HẠN".to_string()]
}
fn default_short_term_liabilities() -> Vec<String> {
    vec!["SHORT-TERM LIABILITIES".to_string(), "NỢ NGẮN HẠN".to_string()]
}
fn default_total_rows() -> Vec<String> {
    vec!["TOTAL".to_string(), "TỔNG CỘNG".to_string()]
}

impl Default for LabelKeys {
    fn default() -> Self {
        Self {
            total_assets: default_total_assets(),
            short_term_assets: default_short_term_assets(),
            short_term_liabilities: default_short_term_liabilities(),
            total_rows: default_total_rows(),
        }
    }
}

impl LabelKeys {
    pub fn needles(&self, role: LineRole) -> &[String] {
        match role {
            LineRole::TotalAssets => &self.total_assets,
            LineRole::ShortTermAssets => &self.short_term_assets,
            LineRole::ShortTermLiabilities => &self.short_term_liabilities,
            LineRole::TotalRow => &self.total_rows,
        }
    }

    pub fn matches(&self, role: LineRole, label: &str) -> bool {
        if label.is_empty() {
            return false;
        }
        let upper = label.to_uppercase();
        self.needles(role)
            .iter()
            .filter(|n| !n.is_empty())
            .any(|n| upper.contains(&n.to_uppercase()))
    }

    /// Name used when reporting that `role` is missing.
    pub fn display_name(&self, role: LineRole) -> String {
        self.needles(role)
            .first()
            .cloned()
            .unwrap_or_else(|| format!("{role:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_is_case_insensitive_substring() {
        let keys = LabelKeys::default();
        assert!(keys.matches(LineRole::TotalAssets, "270. Total assets (100 + 200)"));
        assert!(keys.matches(LineRole::TotalAssets, "Tổng cộng tài sản"));
        assert!(!keys.matches(LineRole::TotalAssets, "Short-term assets"));
    }

    #[test]
    fn test_empty_label_never_matches() {
        let keys = LabelKeys::default();
        assert!(!keys.matches(LineRole::TotalRow, ""));
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let keys: LabelKeys = toml::from_str(r#"total_assets = ["ASSETS, TOTAL"]"#).unwrap();
        assert!(keys.matches(LineRole::TotalAssets, "assets, total"));
        assert_eq!(keys.short_term_assets, default_short_term_assets());
        assert_eq!(keys.display_name(LineRole::TotalAssets), "ASSETS, TOTAL");
    }
}
