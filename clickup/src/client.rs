//! Cliente HTTP para a API do ClickUp

use crate::error::{ClickUpError, Result};
use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// URL pública da API v2
pub const DEFAULT_BASE_URL: &str = "https://api.clickup.com/api/v2";

/// Cliente para interagir com a API v2 do ClickUp
///
/// Autentica com token estático (Personal Token) enviado no header
/// `Authorization` sem prefixo, como a API v2 espera.
#[derive(Clone)]
pub struct ClickUpClient {
    http_client: HttpClient,
    api_token: String,
    base_url: String,
}

impl ClickUpClient {
    /// Cria um novo cliente ClickUp
    ///
    /// # Timeouts
    ///
    /// - Total: 30s
    /// - Connect: 5s
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::with_timeouts(api_token, 30, 5)
    }

    /// Cria um novo cliente com timeouts customizados
    pub fn with_timeouts(
        api_token: impl Into<String>,
        total_timeout_secs: u64,
        connect_timeout_secs: u64,
    ) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(total_timeout_secs))
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .build()
            .map_err(|e| ClickUpError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_token: api_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Troca a URL base (mock servers, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Executa um GET com query string
    pub(crate) async fn get_with_query(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);

        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", &self.api_token)
            .header("Content-Type", "application/json")
            .query(query)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Executa um GET com query string e parseia JSON
    pub(crate) async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self.get_with_query(endpoint, query).await?;
        let body = response.text().await?;
        let json = serde_json::from_str(&body)?;
        Ok(json)
    }

    /// Processa a resposta HTTP e trata erros
    async fn handle_response(&self, response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let status_code = status.as_u16();
        let error_body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

        tracing::error!("ClickUp API error ({}): {}", status_code, error_body);

        // Tentar extrair mensagem de erro do JSON
        let message = if let Ok(json) = serde_json::from_str::<Value>(&error_body) {
            json.get("err")
                .or_else(|| json.get("error"))
                .or_else(|| json.get("message"))
                .and_then(|v| v.as_str())
                .unwrap_or(&error_body)
                .to_string()
        } else {
            error_body
        };

        Err(ClickUpError::ApiError {
            status: status_code,
            message,
        })
    }

    /// Obtém o token de autenticação
    pub fn token(&self) -> &str {
        &self.api_token
    }

    /// Obtém a URL base
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
