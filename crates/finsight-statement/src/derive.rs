//! Growth and share-of-total derivation.

use finsight_common::{FinsightError, Result};
use crate::labels::{LabelKeys, LineRole};
use crate::model::{DerivedItem, DerivedStatement, Statement};

/// Stand-in for a zero denominator. Yields a very large but finite percentage.
pub const EPSILON: f64 = 1e-9;

#[inline]
pub(crate) fn nonzero(v: f64) -> f64 {
    if v == 0.0 { EPSILON } else { v }
}

/// (current − prior) / prior × 100.
pub fn growth_pct(prior: f64, current: f64) -> f64 {
    (current - prior) / nonzero(prior) * 100.0
}

/// Augment every row with growth % and its share of total assets in each period.
///
/// Fails with [`FinsightError::MissingLineItem`] when no label matches the
/// total-assets role.
pub fn derive(statement: &Statement, keys: &LabelKeys) -> Result<DerivedStatement> {
    let total = statement
        .find(LineRole::TotalAssets, keys)
        .ok_or_else(|| FinsightError::MissingLineItem(keys.display_name(LineRole::TotalAssets)))?;

    let total_prior = nonzero(total.prior);
    let total_current = nonzero(total.current);

    let items = statement
        .items
        .iter()
        .map(|item| DerivedItem {
            label: item.label.clone(),
            prior: item.prior,
            current: item.current,
            growth_pct: growth_pct(item.prior, item.current),
            prior_share_pct: item.prior / total_prior * 100.0,
            current_share_pct: item.current / total_current * 100.0,
        })
        .collect();

    tracing::debug!(rows = statement.items.len(), total_prior, total_current, "Statement derived");

    Ok(DerivedStatement { items, total_prior, total_current })
}
