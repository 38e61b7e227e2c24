//! HTML building blocks shared by all pages.

use std::fmt::Write;

use finsight_common::Locale;
use finsight_statement::kpi::Kpi;
use finsight_statement::{format, DerivedStatement};

use crate::i18n::{kpi_title, texts};

pub const MAIN_CSS: &str = include_str!("../static/main.css");

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Full document around `body`.
pub fn page(locale: Locale, body: &str) -> String {
    let t = texts(locale);
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <link rel="stylesheet" href="/static/main.css">
</head>
<body>
<main class="main-content">
    <h1 class="page-title">{title}</h1>
{body}
</main>
</body>
</html>"#,
        lang = locale.as_str(),
        title = escape(t.app_title),
    )
}

pub enum AlertKind {
    Danger,
    Warning,
    Info,
}

pub fn alert(kind: AlertKind, message: &str) -> String {
    let class = match kind {
        AlertKind::Danger => "alert-danger",
        AlertKind::Warning => "alert-warning",
        AlertKind::Info => "alert-info",
    };
    format!(r#"<div class="alert {class}">{}</div>"#, escape(message))
}

pub fn card(header: &str, content: &str) -> String {
    format!(
        r#"<section class="card"><div class="card-header">{}</div>{content}</section>"#,
        escape(header)
    )
}

pub fn section_title(title: &str) -> String {
    format!(r#"<h2 class="section-title">{}</h2>"#, escape(title))
}

pub fn upload_form(locale: Locale) -> String {
    let t = texts(locale);
    card(
        t.upload_heading,
        &format!(
            r#"<form method="post" action="/upload" enctype="multipart/form-data">
        <p class="text-muted">{hint}</p>
        <input type="file" name="file" accept=".xlsx,.xls,.csv" required>
        <button type="submit" class="btn btn-primary">{button}</button>
    </form>"#,
            hint = escape(t.upload_hint),
            button = escape(t.upload_button),
        ),
    )
}

pub fn derived_table(statement: &DerivedStatement, locale: Locale) -> String {
    let headers = format::column_headers(locale);
    let mut out = String::from(r#"<div class="table-container"><table class="table"><thead><tr>"#);
    for h in headers {
        let _ = write!(out, "<th>{}</th>", escape(h));
    }
    out.push_str("</tr></thead><tbody>");
    for i in &statement.items {
        let _ = write!(
            out,
            r#"<tr><td>{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td></tr>"#,
            escape(&i.label),
            format::amount(i.prior),
            format::amount(i.current),
            format::percent(i.growth_pct),
            format::percent(i.prior_share_pct),
            format::percent(i.current_share_pct),
        );
    }
    out.push_str("</tbody></table></div>");
    out
}

pub fn analyze_form(digest: &str, locale: Locale) -> String {
    let t = texts(locale);
    format!(
        r#"<form method="post" action="/analyze" onsubmit="this.classList.add('busy')">
        <input type="hidden" name="digest" value="{digest}">
        <button type="submit" class="btn btn-primary">{button}</button>
        <span class="loading text-muted">{wait}</span>
    </form>"#,
        digest = escape(digest),
        button = escape(t.analyze_button),
        wait = escape(t.analyze_wait),
    )
}

pub fn kpi_grid(kpis: &[Kpi], locale: Locale) -> String {
    let mut out = String::from(r#"<div class="stats-grid">"#);
    for k in kpis {
        let _ = write!(
            out,
            r#"<div class="stat-card"><div class="stat-label">{}</div><div class="stat-value">{}</div></div>"#,
            escape(kpi_title(k.kind, locale)),
            escape(&k.value.to_string()),
        );
    }
    out.push_str("</div>");
    out
}

pub fn back_link(locale: Locale) -> String {
    format!(r#"<p><a class="btn btn-outline" href="/">{}</a></p>"#, escape(texts(locale).back_link))
}
