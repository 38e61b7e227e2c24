//! finsight-web — Web front end for financial statement analysis.
//! Provides:
//!   - spreadsheet upload with derived growth / composition table
//!   - KPI dashboard with bar, pie and growth charts
//!   - AI commentary on the statement

pub mod config;
pub mod secrets;
pub mod llm;
pub mod cache;
pub mod state;
pub mod i18n;
pub mod html;
pub mod charts;
pub mod handlers;
pub mod router;
