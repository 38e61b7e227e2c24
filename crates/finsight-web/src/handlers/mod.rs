//! HTTP handlers for all web routes.

pub mod upload;
pub mod analyze;
pub mod system;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use finsight_common::{FinsightError, Locale};

use crate::html::{self, AlertKind};
use crate::i18n::texts;

/// Error page for a failed upload; processing stops for this request.
pub(crate) fn error_page(err: &FinsightError, locale: Locale) -> Response {
    let t = texts(locale);
    let (status, prefix) = if err.is_structural() {
        (StatusCode::UNPROCESSABLE_ENTITY, t.structure_error)
    } else {
        match err {
            FinsightError::UnsupportedFormat(_)
            | FinsightError::Spreadsheet(_)
            | FinsightError::Csv(_) => (StatusCode::UNPROCESSABLE_ENTITY, t.generic_error),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, t.generic_error),
        }
    };
    let body = format!(
        "{}{}{}",
        html::alert(AlertKind::Danger, &format!("{prefix}: {err}")),
        html::upload_form(locale),
        html::back_link(locale),
    );
    (status, Html(html::page(locale, &body))).into_response()
}

pub(crate) fn message_page(status: StatusCode, kind: AlertKind, message: &str, locale: Locale) -> Response {
    let body = format!("{}{}", html::alert(kind, message), html::upload_form(locale));
    (status, Html(html::page(locale, &body))).into_response()
}
