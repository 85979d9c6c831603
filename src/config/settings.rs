use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::utils::{AppError, AppResult};

pub const DEFAULT_LIST_IDS: &str = "205073978";
pub const DEFAULT_PRODUCT_FIELD_NAME: &str = "⚫ Produto";
pub const DEFAULT_TIMEZONE: &str = "America/Fortaleza";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub clickup: ClickUpSettings,
    pub slack: SlackSettings,
    pub report: ReportSettings,
    pub http: HttpSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClickUpSettings {
    pub token: String,
    /// IDs separados por vírgula
    pub list_ids: String,
    /// Nome exato do custom field de produto
    pub product_field_name: String,
    pub base_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SlackSettings {
    pub bot_token: String,
    pub channel_id: String,
    pub base_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ReportSettings {
    pub timezone: String,
    pub variant: ReportVariant,
    /// Primeira hora local em que o envio é permitido (inclusive)
    pub send_window_start: u32,
    /// Última hora local em que o envio é permitido (inclusive)
    pub send_window_end: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HttpSettings {
    pub timeout_secs: u64,
}

/// Qual conjunto de colunas o relatório usa
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportVariant {
    /// Ontem / Hoje / Hora / Fechados
    Diario,
    /// Mês / Hoje / Fechados
    Mensal,
}

impl ReportVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportVariant::Diario => "diario",
            ReportVariant::Mensal => "mensal",
        }
    }
}

impl Settings {
    /// Carrega defaults, arquivos `config/*` opcionais e variáveis de ambiente,
    /// e valida o resultado. Falha antes de qualquer chamada de rede.
    pub fn new() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .set_default("clickup.token", "")?
            .set_default("clickup.list_ids", DEFAULT_LIST_IDS)?
            .set_default("clickup.product_field_name", DEFAULT_PRODUCT_FIELD_NAME)?
            .set_default("clickup.base_url", clickup::client::DEFAULT_BASE_URL)?
            .set_default("slack.bot_token", "")?
            .set_default("slack.channel_id", "")?
            .set_default("slack.base_url", crate::services::slack::DEFAULT_SLACK_API_URL)?
            .set_default("report.timezone", DEFAULT_TIMEZONE)?
            .set_default("report.variant", "diario")?
            .set_default("report.send_window_start", 8)?
            .set_default("report.send_window_end", 20)?
            .set_default("http.timeout_secs", 30)?
            // Arquivo de configuração base
            .add_source(File::with_name("config/default").required(false))
            // Arquivo específico do ambiente
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Environment::with_prefix("PRODUTO_REPORT").separator("__"));

        // Nomes de variáveis usados pelo agendador
        let overrides = [
            ("SLACK_BOT_TOKEN", "slack.bot_token"),
            ("SLACK_CHANNEL_ID", "slack.channel_id"),
            ("SLACK_API_BASE_URL", "slack.base_url"),
            ("CLICKUP_TOKEN", "clickup.token"),
            ("CLICKUP_LIST_IDS", "clickup.list_ids"),
            ("CLICKUP_API_BASE_URL", "clickup.base_url"),
            ("PRODUCT_FIELD_NAME", "clickup.product_field_name"),
            ("REPORT_TIMEZONE", "report.timezone"),
            ("REPORT_VARIANT", "report.variant"),
            ("HTTP_TIMEOUT_SECS", "http.timeout_secs"),
        ];
        for (var, key) in overrides {
            if let Ok(value) = std::env::var(var) {
                builder = builder.set_override(key, value)?;
            }
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;

        crate::utils::logging::log_config_loaded(
            &run_mode,
            settings.clickup.list_ids().len(),
            settings.report.variant.as_str(),
        );
        Ok(settings)
    }

    /// Confere credenciais, listas, fuso e janela de envio
    pub fn validate(&self) -> AppResult<()> {
        let required = [
            ("SLACK_BOT_TOKEN", &self.slack.bot_token),
            ("SLACK_CHANNEL_ID", &self.slack.channel_id),
            ("CLICKUP_TOKEN", &self.clickup.token),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(AppError::ConfigError(format!(
                "❌ Faltam variáveis de ambiente: {}",
                missing.join(", ")
            )));
        }

        if self.clickup.list_ids().is_empty() {
            return Err(AppError::ConfigError(
                "CLICKUP_LIST_IDS não contém nenhum ID de lista".to_string(),
            ));
        }
        if self.clickup.product_field_name.trim().is_empty() {
            return Err(AppError::ConfigError(
                "PRODUCT_FIELD_NAME não pode ser vazio".to_string(),
            ));
        }

        self.report.tz()?;

        if self.report.send_window_start > self.report.send_window_end
            || self.report.send_window_end > 23
        {
            return Err(AppError::ConfigError(format!(
                "Janela de envio inválida: {}h–{}h",
                self.report.send_window_start, self.report.send_window_end
            )));
        }
        Ok(())
    }
}

impl ClickUpSettings {
    /// IDs de lista, sem espaços e sem entradas vazias
    pub fn list_ids(&self) -> Vec<String> {
        self.list_ids
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect()
    }
}

impl ReportSettings {
    pub fn tz(&self) -> AppResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| AppError::ConfigError(format!("Fuso horário inválido: {}", self.timezone)))
    }

    pub fn in_send_window(&self, hour: u32) -> bool {
        (self.send_window_start..=self.send_window_end).contains(&hour)
    }
}
