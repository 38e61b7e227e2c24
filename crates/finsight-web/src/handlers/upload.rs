//! Upload form and the parse → derive step.

use axum::{
    body::Bytes,
    extract::{multipart::{MultipartError, MultipartRejection}, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use finsight_common::{Locale, Result};
use finsight_statement::{current_ratios, derive, parse_statement, LabelKeys};

use crate::cache::{upload_key, Analysis};
use crate::handlers::{error_page, message_page};
use crate::html::{self, AlertKind};
use crate::i18n::texts;
use crate::state::SharedState;

pub async fn upload_page(State(state): State<SharedState>) -> Html<String> {
    let locale = state.locale();
    let body = format!(
        "{}{}",
        html::upload_form(locale),
        html::alert(AlertKind::Info, texts(locale).upload_prompt),
    );
    Html(html::page(locale, &body))
}

pub async fn upload_submit(
    State(state): State<SharedState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Response {
    let locale = state.locale();
    let t = texts(locale);

    let Ok(mut multipart) = multipart else {
        return message_page(StatusCode::BAD_REQUEST, AlertKind::Danger, t.bad_request, locale);
    };

    let (file_name, bytes) = match read_file_field(&mut multipart).await {
        Ok(Some(file)) => file,
        Ok(None) => return message_page(StatusCode::BAD_REQUEST, AlertKind::Warning, t.no_file, locale),
        Err(e) => {
            tracing::warn!("Malformed upload: {e}");
            let msg = format!("{}: {e}", t.generic_error);
            return message_page(StatusCode::BAD_REQUEST, AlertKind::Danger, &msg, locale);
        }
    };

    let key = upload_key(&file_name, &bytes);
    let analysis = match state.cached(&key) {
        Some(a) => {
            tracing::debug!(file = %file_name, "Derived statement served from cache");
            a
        }
        None => match process(&file_name, &bytes, state.labels()) {
            Ok(a) => state.remember(key.clone(), a),
            Err(e) => {
                tracing::warn!(file = %file_name, structural = e.is_structural(), "Upload rejected: {e}");
                return error_page(&e, locale);
            }
        },
    };

    let body = format!("{}{}", table_section(&analysis, &key, locale), html::back_link(locale));
    Html(html::page(locale, &body)).into_response()
}

async fn read_file_field(multipart: &mut Multipart) -> std::result::Result<Option<(String, Bytes)>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload.xlsx").to_string();
        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Ok(None);
        }
        return Ok(Some((file_name, bytes)));
    }
    Ok(None)
}

pub(crate) fn process(file_name: &str, bytes: &[u8], keys: &LabelKeys) -> Result<Analysis> {
    let statement = parse_statement(bytes, file_name)?;
    let derived = derive(&statement, keys)?;
    let ratios = current_ratios(&derived, keys);
    Ok(Analysis { file_name: file_name.to_string(), derived, ratios })
}

/// Derived table, the liquidity warning when applicable, and the analyze button.
pub(crate) fn table_section(analysis: &Analysis, key: &str, locale: Locale) -> String {
    let t = texts(locale);
    let warning = if analysis.ratios.is_available() {
        String::new()
    } else {
        html::alert(AlertKind::Warning, t.liquidity_warning)
    };
    format!(
        "{}{}",
        html::card(t.table_heading, &html::derived_table(&analysis.derived, locale)),
        html::card(t.analyze_heading, &format!("{warning}{}", html::analyze_form(key, locale))),
    )
}
