//! finsight-statement — the two-period financial statement and everything
//! computed from it:
//!   - spreadsheet / CSV parsing into line items
//!   - growth and share-of-total derivation
//!   - current ratio lookup
//!   - dashboard KPI assembly

pub mod model;
pub mod labels;
pub mod parse;
pub mod derive;
pub mod liquidity;
pub mod kpi;
pub mod format;

pub use model::{DerivedItem, DerivedStatement, LineItem, Statement};
pub use labels::{LabelKeys, LineRole};
pub use derive::{derive, growth_pct, EPSILON};
pub use liquidity::{current_ratios, LiquidityRatios, Ratio};
pub use parse::{parse_statement, SheetFormat};
