//! Statement data model.

use serde::{Deserialize, Serialize};
use crate::labels::{LabelKeys, LineRole};

/// One row of the uploaded statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub label: String,
    pub prior: f64,
    pub current: f64,
}

impl LineItem {
    pub fn new(label: impl Into<String>, prior: f64, current: f64) -> Self {
        Self { label: label.into(), prior, current }
    }
}

/// The raw three-column table: item label, prior period, current period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub items: Vec<LineItem>,
}

impl Statement {
    pub fn new(items: Vec<LineItem>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First row whose label matches `role`.
    pub fn find(&self, role: LineRole, keys: &LabelKeys) -> Option<&LineItem> {
        self.items.iter().find(|i| keys.matches(role, &i.label))
    }
}

impl From<Vec<(&str, f64, f64)>> for Statement {
    fn from(rows: Vec<(&str, f64, f64)>) -> Self {
        Self::new(rows.into_iter().map(|(l, p, c)| LineItem::new(l, p, c)).collect())
    }
}

/// A line item augmented with growth and composition percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedItem {
    pub label: String,
    pub prior: f64,
    pub current: f64,
    pub growth_pct: f64,
    pub prior_share_pct: f64,
    pub current_share_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedStatement {
    pub items: Vec<DerivedItem>,
    /// Total assets used as the share denominator (already epsilon-guarded).
    pub total_prior: f64,
    pub total_current: f64,
}

impl DerivedStatement {
    pub fn find(&self, role: LineRole, keys: &LabelKeys) -> Option<&DerivedItem> {
        self.items.iter().find(|i| keys.matches(role, &i.label))
    }

    /// Mean growth across every row.
    pub fn average_growth_pct(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        self.items.iter().map(|i| i.growth_pct).sum::<f64>() / self.items.len() as f64
    }
}
