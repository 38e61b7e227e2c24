//! Dashboard KPI tiles.

use serde::Serialize;
use std::fmt;

use crate::format;
use crate::labels::{LabelKeys, LineRole};
use crate::liquidity::LiquidityRatios;
use crate::model::DerivedStatement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiKind {
    TotalAssets,
    ShortTermAssets,
    ShortTermLiabilities,
    AverageGrowth,
    ShortTermAssetsShare,
    CurrentRatio,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum KpiValue {
    Amount(f64),
    Percent(f64),
    Ratio(f64),
    Unavailable,
}

impl fmt::Display for KpiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KpiValue::Amount(v) => f.write_str(&format::amount(*v)),
            KpiValue::Percent(v) => f.write_str(&format::percent(*v)),
            KpiValue::Ratio(v) => f.write_str(&format::ratio(*v)),
            KpiValue::Unavailable => f.write_str("N/A"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Kpi {
    pub kind: KpiKind,
    pub value: KpiValue,
}

/// The six dashboard tiles in row-major order for a three-column grid:
/// amounts on the first row, each with its derived indicator below it.
pub fn dashboard_kpis(
    statement: &DerivedStatement,
    ratios: &LiquidityRatios,
    keys: &LabelKeys,
) -> Vec<Kpi> {
    let total = statement.find(LineRole::TotalAssets, keys);
    let sta = statement.find(LineRole::ShortTermAssets, keys);
    let stl = statement.find(LineRole::ShortTermLiabilities, keys);

    let amount = |v: Option<f64>| v.map(KpiValue::Amount).unwrap_or(KpiValue::Unavailable);

    vec![
        Kpi { kind: KpiKind::TotalAssets, value: amount(total.map(|i| i.current)) },
        Kpi { kind: KpiKind::ShortTermAssets, value: amount(sta.map(|i| i.current)) },
        Kpi { kind: KpiKind::ShortTermLiabilities, value: amount(stl.map(|i| i.current)) },
        Kpi { kind: KpiKind::AverageGrowth, value: KpiValue::Percent(statement.average_growth_pct()) },
        Kpi {
            kind: KpiKind::ShortTermAssetsShare,
            value: sta.map(|i| KpiValue::Percent(i.current_share_pct)).unwrap_or(KpiValue::Unavailable),
        },
        Kpi {
            kind: KpiKind::CurrentRatio,
            value: ratios.current.value().map(KpiValue::Ratio).unwrap_or(KpiValue::Unavailable),
        },
    ]
}
