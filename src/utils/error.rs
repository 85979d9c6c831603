use thiserror::Error;

/// Erros do relatório
///
/// Todos são fatais para a execução: sobem até `main` sem publicação parcial.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuração ausente ou inválida (antes de qualquer chamada de rede)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Falha de transporte ou status não-2xx na API do ClickUp
    #[error("ClickUp API error: {0}")]
    ClickUp(#[from] clickup::ClickUpError),

    /// Slack respondeu sem `ok: true`; carrega o corpo completo da resposta
    #[error("Erro Slack: {0}")]
    SlackApi(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
