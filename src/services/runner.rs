//! Execução do relatório
//!
//! Dois estados: fora da janela de envio a execução termina com sucesso sem
//! tocar a rede; dentro dela o pipeline roda em sequência (janelas → busca →
//! contagem → tabela → Slack). Qualquer erro aborta sem publicação parcial.

use chrono::{DateTime, Timelike};
use chrono_tz::Tz;
use clickup::{ClickUpClient, Task, TaskManager};

use super::aggregator::{count_by_product, total, CountMode};
use super::report::{render_report, ReportColumn};
use super::slack::{PostedMessage, SlackPublisher};
use super::time_windows::TimeWindows;
use crate::config::{ReportVariant, Settings};
use crate::utils::logging::{log_counts, log_outside_send_window, log_window_fetched};
use crate::utils::AppResult;

const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Resultado de uma execução bem-sucedida
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Fora da janela de envio; não é erro
    Skipped { local_time: String, start_hour: u32, end_hour: u32 },
    Published { local_time: String, summary: String, message: PostedMessage },
}

impl RunOutcome {
    /// Linha de status para o operador
    pub fn status_line(&self) -> String {
        match self {
            RunOutcome::Skipped { local_time, start_hour, end_hour } => format!(
                "⏰ {} - Fora do horário de envio ({:02}h–{:02}h).",
                local_time, start_hour, end_hour
            ),
            RunOutcome::Published { local_time, .. } => {
                format!("✅ Mensagem enviada ao Slack às {}.", local_time)
            }
        }
    }
}

/// Colunas montadas + prioridade de ordenação
struct ReportLayout {
    title: &'static str,
    columns: Vec<ReportColumn>,
    sort_priority: Vec<usize>,
}

pub struct ReportRunner {
    settings: Settings,
    list_ids: Vec<String>,
    tasks: TaskManager,
    publisher: SlackPublisher,
}

impl ReportRunner {
    pub fn new(settings: Settings) -> AppResult<Self> {
        let client = ClickUpClient::with_timeouts(
            settings.clickup.token.clone(),
            settings.http.timeout_secs,
            CONNECT_TIMEOUT_SECS,
        )?
        .with_base_url(settings.clickup.base_url.clone());
        let publisher = SlackPublisher::new(&settings.slack, settings.http.timeout_secs)?;

        Ok(Self {
            list_ids: settings.clickup.list_ids(),
            tasks: TaskManager::new(client),
            publisher,
            settings,
        })
    }

    pub fn timezone(&self) -> AppResult<Tz> {
        self.settings.report.tz()
    }

    /// Executa uma vez para o instante `now` (já no fuso do relatório)
    pub async fn run(&self, now: DateTime<Tz>) -> AppResult<RunOutcome> {
        let report_settings = &self.settings.report;
        let local_time = now.format("%H:%M").to_string();

        if !report_settings.in_send_window(now.hour()) {
            log_outside_send_window(
                &local_time,
                report_settings.send_window_start,
                report_settings.send_window_end,
            );
            return Ok(RunOutcome::Skipped {
                local_time,
                start_hour: report_settings.send_window_start,
                end_hour: report_settings.send_window_end,
            });
        }

        let windows = TimeWindows::compute(now);
        tracing::info!("🕒 Janelas calculadas: {:?}", windows);

        let layout = match report_settings.variant {
            ReportVariant::Diario => self.daily_layout(&windows).await?,
            ReportVariant::Mensal => self.monthly_layout(&windows).await?,
        };
        for column in &layout.columns {
            log_counts(&column.header, column.counts.len(), total(&column.counts));
        }

        let report = render_report(&layout.columns, &layout.sort_priority);
        let context = format!("*{}* ({})", now.format("%d/%m/%Y %H:%M"), now.timezone().name());
        let message = self
            .publisher
            .publish(layout.title, Some(&context), &report)
            .await?;

        Ok(RunOutcome::Published {
            local_time,
            summary: report.summary,
            message,
        })
    }

    /// Ontem / Hoje / Hora / Fechados, ordenado por Hoje
    async fn daily_layout(&self, w: &TimeWindows) -> AppResult<ReportLayout> {
        let field = self.field_name();

        let tasks_today = self.fetch("hoje", w.today_start, w.now).await?;
        let tasks_hour: Vec<&Task> = created_within(&tasks_today, w.hour_ago, w.now).collect();
        let tasks_yesterday = self.fetch("ontem", w.yesterday_start, w.yesterday_end).await?;
        let tasks_since_yesterday = self.fetch("ontem+hoje", w.yesterday_start, w.now).await?;

        let closed_today = CountMode::Closed {
            from: Some(w.today_start),
            to: Some(w.now),
        };

        Ok(ReportLayout {
            title: "📊 Tasks por Produto",
            columns: vec![
                ReportColumn::new(
                    "Ontem",
                    "📅 Ontem",
                    count_by_product(&tasks_yesterday, field, CountMode::Created),
                ),
                ReportColumn::new(
                    "Hoje",
                    "📅 Hoje",
                    count_by_product(&tasks_today, field, CountMode::Created),
                ),
                ReportColumn::new(
                    "Hora",
                    "🕐 Hora",
                    count_by_product(tasks_hour, field, CountMode::Created),
                ),
                ReportColumn::new(
                    "Fechados",
                    "✅ Fechados",
                    count_by_product(&tasks_since_yesterday, field, closed_today),
                ),
            ],
            sort_priority: vec![1],
        })
    }

    /// Mês / Hoje / Fechados, ordenado por Mês e depois Hoje
    async fn monthly_layout(&self, w: &TimeWindows) -> AppResult<ReportLayout> {
        let field = self.field_name();

        let tasks_month = self.fetch("mês", w.month_start, w.now).await?;
        let tasks_today: Vec<&Task> = created_within(&tasks_month, w.today_start, w.now).collect();

        let closed_in_month = CountMode::Closed {
            from: Some(w.month_start),
            to: Some(w.now),
        };

        Ok(ReportLayout {
            title: "📊 Tasks por Produto no mês",
            columns: vec![
                ReportColumn::new(
                    "Mês",
                    "🗓️ Mês",
                    count_by_product(&tasks_month, field, CountMode::Created),
                ),
                ReportColumn::new(
                    "Hoje",
                    "📅 Hoje",
                    count_by_product(tasks_today, field, CountMode::Created),
                ),
                ReportColumn::new(
                    "Fechados",
                    "✅ Fechados",
                    count_by_product(&tasks_month, field, closed_in_month),
                ),
            ],
            sort_priority: vec![0, 1],
        })
    }

    async fn fetch(&self, window: &str, created_gt: i64, created_lt: i64) -> AppResult<Vec<Task>> {
        let tasks = self
            .tasks
            .fetch_created_between_lists(&self.list_ids, created_gt, created_lt)
            .await?;
        log_window_fetched(window, tasks.len());
        Ok(tasks)
    }

    fn field_name(&self) -> &str {
        &self.settings.clickup.product_field_name
    }
}

/// Subconjunto criado em `[from, to]` (inclusivo); sem data de criação conta como 0
fn created_within(tasks: &[Task], from: i64, to: i64) -> impl Iterator<Item = &Task> {
    tasks
        .iter()
        .filter(move |task| (from..=to).contains(&task.created_at_ms()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{ClickUpSettings, HttpSettings, ReportSettings, SlackSettings};
    use crate::utils::AppError;
    use chrono::TimeZone;
    use chrono_tz::America::Fortaleza;
    use httpmock::prelude::*;
    use serde_json::{json, Value};

    const FIELD: &str = "⚫ Produto";

    fn settings_for(server: &MockServer, variant: ReportVariant) -> Settings {
        Settings {
            clickup: ClickUpSettings {
                token: "pk_test".to_string(),
                list_ids: "900".to_string(),
                product_field_name: FIELD.to_string(),
                base_url: server.base_url(),
            },
            slack: SlackSettings {
                bot_token: "xoxb-test".to_string(),
                channel_id: "C1".to_string(),
                base_url: server.base_url(),
            },
            report: ReportSettings {
                timezone: "America/Fortaleza".to_string(),
                variant,
                send_window_start: 8,
                send_window_end: 20,
            },
            http: HttpSettings { timeout_secs: 5 },
        }
    }

    fn task(product: Option<&str>, created: i64, closed: Option<i64>) -> Value {
        json!({
            "id": format!("t-{}", created),
            "date_created": created.to_string(),
            "date_closed": closed.map(|c| c.to_string()),
            "custom_fields": [{"name": FIELD, "value": product}]
        })
    }

    async fn mock_window(server: &MockServer, gt: i64, lt: i64, tasks: Vec<Value>) {
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/list/900/task")
                    .query_param("page", "0")
                    .query_param("date_created_gt", gt.to_string())
                    .query_param("date_created_lt", lt.to_string());
                then.status(200).json_body(json!({ "tasks": tasks }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/list/900/task")
                    .query_param("page", "1")
                    .query_param("date_created_gt", gt.to_string())
                    .query_param("date_created_lt", lt.to_string());
                then.status(200).json_body(json!({ "tasks": [] }));
            })
            .await;
    }

    #[tokio::test]
    async fn test_outside_send_window_skips_everything() {
        let server = MockServer::start_async().await;
        let clickup = server
            .mock_async(|when, then| {
                when.method(GET).path("/list/900/task");
                then.status(500);
            })
            .await;
        let slack = server
            .mock_async(|when, then| {
                when.method(POST).path("/chat.postMessage");
                then.status(500);
            })
            .await;

        let runner = ReportRunner::new(settings_for(&server, ReportVariant::Diario)).unwrap();
        let now = Fortaleza.with_ymd_and_hms(2024, 3, 15, 21, 5, 0).unwrap();
        let outcome = runner.run(now).await.unwrap();

        assert_eq!(
            outcome,
            RunOutcome::Skipped { local_time: "21:05".to_string(), start_hour: 8, end_hour: 20 }
        );
        assert_eq!(outcome.status_line(), "⏰ 21:05 - Fora do horário de envio (08h–20h).");
        clickup.assert_hits_async(0).await;
        slack.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_daily_report_end_to_end() {
        let server = MockServer::start_async().await;
        let now = Fortaleza.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();
        let w = TimeWindows::compute(now);

        mock_window(
            &server,
            w.today_start,
            w.now,
            vec![
                task(Some("A"), w.now - 600_000, None),
                task(Some("B"), w.now - 7_200_000, None),
                task(None, w.now - 300_000, None),
            ],
        )
        .await;
        mock_window(
            &server,
            w.yesterday_start,
            w.yesterday_end,
            vec![task(Some("A"), w.yesterday_start + 10, None)],
        )
        .await;
        mock_window(
            &server,
            w.yesterday_start,
            w.now,
            vec![
                task(Some("A"), w.yesterday_start + 10, Some(w.today_start)),
                task(Some("B"), w.yesterday_start + 20, Some(w.yesterday_end)),
                task(Some("C"), w.today_start + 30, None),
            ],
        )
        .await;

        let slack = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat.postMessage")
                    .header("authorization", "Bearer xoxb-test")
                    .body_contains("📅 Ontem: 1  |  📅 Hoje: 3  |  🕐 Hora: 2  |  ✅ Fechados: 1")
                    .body_contains("*15/03/2024 10:30* (America/Fortaleza)")
                    .body_contains("📊 Tasks por Produto")
                    .body_contains("Produto      Ontem  Hoje  Hora  Fechados")
                    .body_contains("A                1     1     1         1")
                    .body_contains("B                0     1     0         0")
                    .body_contains("Sem produto      0     1     1         0");
                then.status(200).json_body(json!({"ok": true, "channel": "C1", "ts": "1.0"}));
            })
            .await;

        let runner = ReportRunner::new(settings_for(&server, ReportVariant::Diario)).unwrap();
        let outcome = runner.run(now).await.unwrap();

        slack.assert_hits_async(1).await;
        match &outcome {
            RunOutcome::Published { summary, message, .. } => {
                assert_eq!(
                    summary,
                    "📅 Ontem: 1  |  📅 Hoje: 3  |  🕐 Hora: 2  |  ✅ Fechados: 1"
                );
                assert_eq!(message.ts.as_deref(), Some("1.0"));
            }
            other => panic!("Expected Published, got {:?}", other),
        }
        assert_eq!(outcome.status_line(), "✅ Mensagem enviada ao Slack às 10:30.");
    }

    #[tokio::test]
    async fn test_monthly_report_end_to_end() {
        let server = MockServer::start_async().await;
        let now = Fortaleza.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        let w = TimeWindows::compute(now);

        mock_window(
            &server,
            w.month_start,
            w.now,
            vec![
                task(Some("X"), w.month_start + 1, Some(w.month_start + 2)),
                task(Some("X"), w.month_start + 3, None),
                task(Some("Y"), w.today_start, None),
            ],
        )
        .await;
        let slack = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat.postMessage")
                    .body_contains("🗓️ Mês: 3  |  📅 Hoje: 1  |  ✅ Fechados: 1")
                    .body_contains("📊 Tasks por Produto no mês");
                then.status(200).json_body(json!({"ok": true, "channel": "C1"}));
            })
            .await;

        let runner = ReportRunner::new(settings_for(&server, ReportVariant::Mensal)).unwrap();
        let outcome = runner.run(now).await.unwrap();

        slack.assert_hits_async(1).await;
        assert!(matches!(outcome, RunOutcome::Published { .. }));
    }

    #[tokio::test]
    async fn test_clickup_failure_aborts_without_publishing() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/list/900/task");
                then.status(500).json_body(json!({"err": "boom"}));
            })
            .await;
        let slack = server
            .mock_async(|when, then| {
                when.method(POST).path("/chat.postMessage");
                then.status(200).json_body(json!({"ok": true}));
            })
            .await;

        let runner = ReportRunner::new(settings_for(&server, ReportVariant::Diario)).unwrap();
        let now = Fortaleza.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap();
        let err = runner.run(now).await.unwrap_err();

        assert!(matches!(err, AppError::ClickUp(_)));
        slack.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_clickup_timeout_aborts_without_publishing() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/list/900/task");
                then.status(200)
                    .delay(std::time::Duration::from_secs(3))
                    .json_body(json!({"tasks": []}));
            })
            .await;
        let slack = server
            .mock_async(|when, then| {
                when.method(POST).path("/chat.postMessage");
                then.status(200).json_body(json!({"ok": true}));
            })
            .await;

        let mut settings = settings_for(&server, ReportVariant::Diario);
        settings.http.timeout_secs = 1;
        let runner = ReportRunner::new(settings).unwrap();
        let now = Fortaleza.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let err = runner.run(now).await.unwrap_err();

        assert!(matches!(err, AppError::ClickUp(clickup::ClickUpError::HttpError(_))));
        slack.assert_hits_async(0).await;
    }

    #[test]
    fn test_created_within_is_inclusive() {
        let tasks: Vec<Task> = [10, 20, 30, 40]
            .iter()
            .map(|c| serde_json::from_value(task(Some("A"), *c, None)).unwrap())
            .collect();
        let ids: Vec<i64> = created_within(&tasks, 20, 30).map(|t| t.created_at_ms()).collect();
        assert_eq!(ids, vec![20, 30]);
    }
}
