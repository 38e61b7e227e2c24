//! AI commentary + dashboard for a previously uploaded statement.

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use finsight_common::Locale;
use finsight_llm::commentary::{build_analysis_data, build_prompt, request_commentary, Commentary};
use finsight_statement::kpi::dashboard_kpis;
use finsight_statement::LabelKeys;

use crate::cache::Analysis;
use crate::charts;
use crate::handlers::message_page;
use crate::handlers::upload::table_section;
use crate::html::{self, AlertKind};
use crate::i18n::texts;
use crate::llm::generation_settings;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct AnalyzeForm {
    pub digest: String,
}

pub async fn analyze_submit(
    State(state): State<SharedState>,
    form: Result<Form<AnalyzeForm>, FormRejection>,
) -> Response {
    let locale = state.locale();
    let t = texts(locale);

    let form = match form {
        Ok(Form(form)) => form,
        Err(e) => {
            tracing::warn!("Malformed analyze request: {e}");
            return message_page(StatusCode::BAD_REQUEST, AlertKind::Danger, t.bad_request, locale);
        }
    };

    let Some(analysis) = state.cached(&form.digest) else {
        return message_page(StatusCode::NOT_FOUND, AlertKind::Warning, t.session_expired, locale);
    };
    let table = table_section(&analysis, &form.digest, locale);

    let Some(backend) = state.llm.clone() else {
        tracing::warn!(file = %analysis.file_name, "Analysis requested without an API key");
        let body = format!(
            "{table}{}{}",
            html::alert(AlertKind::Danger, t.missing_key),
            html::back_link(locale)
        );
        return Html(html::page(locale, &body)).into_response();
    };

    let keys = state.labels();
    let data = build_analysis_data(&analysis.derived, &analysis.ratios, keys, locale);
    tracing::info!(
        file = %analysis.file_name,
        rows = analysis.derived.items.len(),
        model = backend.model_id(),
        "Requesting commentary"
    );
    let commentary = request_commentary(
        backend.as_ref(),
        build_prompt(&data, locale),
        generation_settings(&state.config.llm),
    )
    .await;

    let body = format!(
        "{table}{}{}",
        render_dashboard(&analysis, &commentary, keys, locale),
        html::back_link(locale)
    );
    Html(html::page(locale, &body)).into_response()
}

fn render_dashboard(analysis: &Analysis, commentary: &Commentary, keys: &LabelKeys, locale: Locale) -> String {
    let t = texts(locale);
    let derived = &analysis.derived;
    let kpis = dashboard_kpis(derived, &analysis.ratios, keys);

    let ai_kind = match commentary {
        Commentary::Text(_) => AlertKind::Info,
        Commentary::Failed(_) => AlertKind::Danger,
    };

    [
        html::card(t.dashboard_heading, &html::kpi_grid(&kpis, locale)),
        html::section_title(t.charts_heading),
        html::card(
            t.bar_title,
            &charts::bar_chart(derived, t.bar_title, t.legend_prior, t.legend_current, t.no_chart_data),
        ),
        html::card(t.pie_title, &charts::pie_chart(derived, keys, t.pie_title, t.no_chart_data)),
        html::card(t.growth_title, &charts::growth_chart(derived, t.growth_title, t.no_chart_data)),
        html::card(t.ai_heading, &html::alert(ai_kind, &commentary.display_text(locale))),
    ]
    .concat()
}
