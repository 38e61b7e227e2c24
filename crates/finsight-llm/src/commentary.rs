//! Natural-language commentary on a derived statement.
//!
//! The data block sent to the model is the derived table as markdown,
//! followed by a short summary table holding the short-term assets growth
//! and the current ratio for both periods.

use finsight_common::Locale;
use finsight_statement::{format, DerivedStatement, LabelKeys, LineRole, LiquidityRatios};

use crate::backend::{LlmBackend, LlmError, LlmRequest, Message};

/// Outcome of a commentary request. Failures are displayed inline.
#[derive(Debug, Clone, PartialEq)]
pub enum Commentary {
    Text(String),
    Failed(CommentaryFailure),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommentaryFailure {
    InvalidCredential,
    Other(String),
}

impl CommentaryFailure {
    pub fn classify(err: &LlmError) -> Self {
        if err.is_invalid_credential() {
            CommentaryFailure::InvalidCredential
        } else {
            CommentaryFailure::Other(err.to_string())
        }
    }

    pub fn message(&self, locale: Locale) -> String {
        match (self, locale) {
            (CommentaryFailure::InvalidCredential, Locale::En) => {
                "Error: the API key is invalid or has expired.".to_string()
            }
            (CommentaryFailure::InvalidCredential, Locale::Vi) => {
                "Lỗi: Key không hợp lệ hoặc hết hạn.".to_string()
            }
            (CommentaryFailure::Other(e), Locale::En) => format!("Error calling the AI service: {e}"),
            (CommentaryFailure::Other(e), Locale::Vi) => format!("Lỗi khi gọi dịch vụ AI: {e}"),
        }
    }
}

impl Commentary {
    /// Text to show the user: the model's reply or a localized error.
    pub fn display_text(&self, locale: Locale) -> String {
        match self {
            Commentary::Text(t) => t.clone(),
            Commentary::Failed(f) => f.message(locale),
        }
    }
}

/// Generation settings forwarded with each request.
#[derive(Debug, Clone, Copy)]
pub struct GenerationSettings {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self { max_tokens: 2048, temperature: 0.4 }
    }
}

fn markdown_table<const N: usize>(headers: [&str; N], rows: &[[String; N]]) -> String {
    let escape = |s: &str| s.replace('|', "\\|").replace('\n', " ");
    let mut out = String::new();
    out.push_str("| ");
    out.push_str(&headers.iter().map(|h| escape(*h)).collect::<Vec<_>>().join(" | "));
    out.push_str(" |\n|");
    out.push_str(&vec!["---"; N].join("|"));
    out.push_str("|\n");
    for row in rows {
        out.push_str("| ");
        out.push_str(&row.iter().map(|c| escape(c.as_str())).collect::<Vec<_>>().join(" | "));
        out.push_str(" |\n");
    }
    out
}

/// The derived table serialized as a markdown pipe table.
pub fn statement_markdown(statement: &DerivedStatement, locale: Locale) -> String {
    let rows: Vec<[String; 6]> = statement
        .items
        .iter()
        .map(|i| {
            [
                i.label.clone(),
                format::amount(i.prior),
                format::amount(i.current),
                format::percent(i.growth_pct),
                format::percent(i.prior_share_pct),
                format::percent(i.current_share_pct),
            ]
        })
        .collect();
    markdown_table(format::column_headers(locale), &rows)
}

/// Data block embedded in the prompt.
pub fn build_analysis_data(
    statement: &DerivedStatement,
    ratios: &LiquidityRatios,
    keys: &LabelKeys,
    locale: Locale,
) -> String {
    let sta_growth = statement
        .find(LineRole::ShortTermAssets, keys)
        .map(|i| format::percent(i.growth_pct))
        .unwrap_or_else(|| "N/A".to_string());

    let (headers, labels) = match locale {
        Locale::En => (
            ["Item", "Value"],
            [
                "Short-term assets growth (%)",
                "Current ratio (prior period)",
                "Current ratio (current period)",
            ],
        ),
        Locale::Vi => (
            ["Chỉ tiêu", "Giá trị"],
            [
                "Tăng trưởng Tài sản ngắn hạn (%)",
                "Thanh toán hiện hành (N-1)",
                "Thanh toán hiện hành (N)",
            ],
        ),
    };
    let summary = markdown_table(
        headers,
        &[
            [labels[0].to_string(), sta_growth],
            [labels[1].to_string(), ratios.prior.to_string()],
            [labels[2].to_string(), ratios.current.to_string()],
        ],
    );

    format!("{}\n{}", statement_markdown(statement, locale), summary)
}

pub fn build_prompt(data: &str, locale: Locale) -> String {
    match locale {
        Locale::En => format!(
            "You are a financial analysis expert. Write a 3–4 paragraph commentary on the \
             company's financial position based on the following data. Reply in English.\n\n{data}"
        ),
        Locale::Vi => format!(
            "Bạn là chuyên gia phân tích tài chính. Hãy viết nhận xét 3–4 đoạn về tình hình \
             tài chính của doanh nghiệp dựa trên dữ liệu sau. Trả lời bằng tiếng Việt.\n\n{data}"
        ),
    }
}

/// Send `prompt` to `backend`. Never fails: errors become [`Commentary::Failed`].
pub async fn request_commentary(
    backend: &dyn LlmBackend,
    prompt: String,
    settings: GenerationSettings,
) -> Commentary {
    let req = LlmRequest {
        messages: vec![Message::user(prompt)],
        model: None,
        max_tokens: Some(settings.max_tokens),
        temperature: Some(settings.temperature),
    };

    match backend.complete(req).await {
        Ok(resp) => {
            tracing::info!(
                model = %resp.model,
                prompt_tokens = resp.prompt_tokens,
                completion_tokens = resp.completion_tokens,
                "Commentary received"
            );
            Commentary::Text(resp.content)
        }
        Err(e) => {
            tracing::warn!(model = backend.model_id(), error = %e, "Commentary request failed");
            Commentary::Failed(CommentaryFailure::classify(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LlmResponse;
    use async_trait::async_trait;
    use finsight_statement::{current_ratios, derive, Statement};
    use std::sync::Mutex;

    struct StubBackend {
        reply: Mutex<Option<Result<String, LlmError>>>,
        seen_prompt: Mutex<Option<String>>,
    }

    impl StubBackend {
        fn new(reply: Result<String, LlmError>) -> Self {
            Self { reply: Mutex::new(Some(reply)), seen_prompt: Mutex::new(None) }
        }
    }

    #[async_trait]
    impl LlmBackend for StubBackend {
        async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError> {
            *self.seen_prompt.lock().unwrap() = Some(req.messages[0].content.clone());
            let content = self.reply.lock().unwrap().take().unwrap()?;
            Ok(LlmResponse { content, model: "stub".into(), prompt_tokens: 1, completion_tokens: 1 })
        }
        fn model_id(&self) -> &str { "stub" }
        fn is_local(&self) -> bool { true }
    }

    fn sample() -> (DerivedStatement, LiquidityRatios) {
        let keys = LabelKeys::default();
        let d = derive(
            &Statement::from(vec![
                ("TOTAL ASSETS", 100.0, 200.0),
                ("SHORT-TERM ASSETS", 40.0, 120.0),
                ("SHORT-TERM LIABILITIES", 20.0, 60.0),
            ]),
            &keys,
        )
        .unwrap();
        let r = current_ratios(&d, &keys);
        (d, r)
    }

    #[test]
    fn test_analysis_data_contains_table_and_summary() {
        let (d, r) = sample();
        let data = build_analysis_data(&d, &r, &LabelKeys::default(), Locale::En);
        assert!(data.contains("| Item | Prior period | Current period |"));
        assert!(data.contains("| SHORT-TERM ASSETS | 40 | 120 | 200.00% | 40.00% | 60.00% |"));
        assert!(data.contains("| Short-term assets growth (%) | 200.00% |"));
        assert!(data.contains("| Current ratio (current period) | 2.00 |"));
    }

    #[test]
    fn test_analysis_data_marks_missing_rows() {
        let keys = LabelKeys::default();
        let d = derive(&Statement::from(vec![("TOTAL ASSETS", 1.0, 1.0)]), &keys).unwrap();
        let r = current_ratios(&d, &keys);
        let data = build_analysis_data(&d, &r, &keys, Locale::Vi);
        assert!(data.contains("| Tăng trưởng Tài sản ngắn hạn (%) | N/A |"));
        assert!(data.contains("| Thanh toán hiện hành (N) | N/A |"));
    }

    #[test]
    fn test_pipe_in_label_is_escaped() {
        let keys = LabelKeys::default();
        let d = derive(&Statement::from(vec![("TOTAL ASSETS", 1.0, 1.0), ("A|B", 1.0, 1.0)]), &keys).unwrap();
        assert!(statement_markdown(&d, Locale::En).contains("| A\\|B |"));
    }

    #[test]
    fn test_prompt_embeds_data() {
        let p = build_prompt("DATA-BLOCK", Locale::En);
        assert!(p.starts_with("You are a financial analysis expert."));
        assert!(p.ends_with("DATA-BLOCK"));
    }

    #[tokio::test]
    async fn test_request_commentary_returns_text() {
        let backend = StubBackend::new(Ok("Solid liquidity.".into()));
        let c = request_commentary(&backend, "prompt".into(), GenerationSettings::default()).await;
        assert_eq!(c, Commentary::Text("Solid liquidity.".into()));
        assert_eq!(backend.seen_prompt.lock().unwrap().as_deref(), Some("prompt"));
    }

    #[tokio::test]
    async fn test_invalid_key_is_distinguished() {
        let backend = StubBackend::new(Err(LlmError::ApiError {
            status: 400,
            code: Some("INVALID_ARGUMENT".into()),
            message: "API key not valid".into(),
        }));
        let c = request_commentary(&backend, "p".into(), GenerationSettings::default()).await;
        assert_eq!(c, Commentary::Failed(CommentaryFailure::InvalidCredential));
        assert_eq!(c.display_text(Locale::En), "Error: the API key is invalid or has expired.");
    }

    #[tokio::test]
    async fn test_other_failure_keeps_detail() {
        let backend = StubBackend::new(Err(LlmError::EmptyResponse));
        let c = request_commentary(&backend, "p".into(), GenerationSettings::default()).await;
        assert!(matches!(c, Commentary::Failed(CommentaryFailure::Other(_))));
        assert!(c.display_text(Locale::Vi).contains("Model returned no text"));
    }
}
