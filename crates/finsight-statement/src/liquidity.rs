//! Current ratio (short-term assets / short-term liabilities).

use serde::Serialize;
use std::fmt;

use crate::derive::nonzero;
use crate::labels::{LabelKeys, LineRole};
use crate::model::DerivedStatement;

/// A ratio that may be unavailable when its inputs are missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Ratio {
    Available(f64),
    Unavailable,
}

impl Ratio {
    pub fn value(&self) -> Option<f64> {
        match self {
            Ratio::Available(v) => Some(*v),
            Ratio::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Ratio::Available(_))
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Available(v) => write!(f, "{v:.2}"),
            Ratio::Unavailable => f.write_str("N/A"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LiquidityRatios {
    pub prior: Ratio,
    pub current: Ratio,
}

impl LiquidityRatios {
    pub const UNAVAILABLE: Self = Self { prior: Ratio::Unavailable, current: Ratio::Unavailable };

    pub fn is_available(&self) -> bool {
        self.prior.is_available() && self.current.is_available()
    }
}

/// Current ratio for both periods. Missing either input row degrades both
/// periods to [`Ratio::Unavailable`].
pub fn current_ratios(statement: &DerivedStatement, keys: &LabelKeys) -> LiquidityRatios {
    let assets = statement.find(LineRole::ShortTermAssets, keys);
    let liabilities = statement.find(LineRole::ShortTermLiabilities, keys);

    match (assets, liabilities) {
        (Some(a), Some(l)) => LiquidityRatios {
            prior: Ratio::Available(a.prior / nonzero(l.prior)),
            current: Ratio::Available(a.current / nonzero(l.current)),
        },
        _ => {
            tracing::warn!(
                short_term_assets = assets.is_some(),
                short_term_liabilities = liabilities.is_some(),
                "Current ratio unavailable: input line item missing"
            );
            LiquidityRatios::UNAVAILABLE
        }
    }
}
