//! Publicação do relatório no Slack via `chat.postMessage`
//!
//! A resposta só é sucesso com `"ok": true` explícito; qualquer outra coisa
//! vira [`AppError::SlackApi`] com o corpo inteiro. Sem retry.

use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use super::report::Report;
use crate::config::settings::SlackSettings;
use crate::utils::logging::{log_slack_published, log_slack_rejected};
use crate::utils::{AppError, AppResult};

pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api";

/// Confirmação devolvida pelo Slack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    pub channel: String,
    pub ts: Option<String>,
}

#[derive(Clone)]
pub struct SlackPublisher {
    http_client: Client,
    bot_token: String,
    channel_id: String,
    base_url: String,
}

impl SlackPublisher {
    pub fn new(settings: &SlackSettings, timeout_secs: u64) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            bot_token: settings.bot_token.clone(),
            channel_id: settings.channel_id.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Blocos: header, contexto opcional, resumo, divisor, tabela
    pub fn build_blocks(title: &str, context: Option<&str>, report: &Report) -> Vec<Value> {
        let mut blocks = vec![json!({
            "type": "header",
            "text": {"type": "plain_text", "text": title}
        })];
        if let Some(context) = context {
            blocks.push(json!({
                "type": "context",
                "elements": [{"type": "mrkdwn", "text": context}]
            }));
        }
        blocks.push(json!({
            "type": "section",
            "text": {"type": "mrkdwn", "text": report.summary}
        }));
        blocks.push(json!({"type": "divider"}));
        blocks.push(json!({
            "type": "section",
            "text": {"type": "mrkdwn", "text": report.table}
        }));
        blocks
    }

    pub async fn publish(
        &self,
        title: &str,
        context: Option<&str>,
        report: &Report,
    ) -> AppResult<PostedMessage> {
        let payload = json!({
            "channel": self.channel_id,
            "text": report.summary,
            "blocks": Self::build_blocks(title, context, report),
        });

        let url = format!("{}/chat.postMessage", self.base_url);
        tracing::debug!("POST {} (canal {})", url, self.channel_id);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.bot_token)
            .header("Content-Type", "application/json; charset=utf-8")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        let data: Value = match serde_json::from_str(&body) {
            Ok(data) => data,
            Err(_) => {
                log_slack_rejected(&self.channel_id, &body);
                return Err(AppError::SlackApi(format!("status {}: {}", status.as_u16(), body)));
            }
        };

        if data.get("ok").and_then(Value::as_bool) != Some(true) {
            log_slack_rejected(&self.channel_id, &body);
            return Err(AppError::SlackApi(data.to_string()));
        }

        let posted = PostedMessage {
            channel: data
                .get("channel")
                .and_then(Value::as_str)
                .unwrap_or(&self.channel_id)
                .to_string(),
            ts: data.get("ts").and_then(Value::as_str).map(String::from),
        };
        log_slack_published(&posted.channel, posted.ts.as_deref());
        Ok(posted)
    }
}
