//! Task types do ClickUp
//!
//! Versão de leitura da tarefa: só os campos que relatórios consomem.
//! Campos desconhecidos da API são ignorados.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use super::CustomField;

/// Representa uma tarefa retornada por `GET /list/{list_id}/task`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    /// Data de criação (timestamp em milissegundos)
    #[serde(default, deserialize_with = "deserialize_millis")]
    pub date_created: Option<i64>,

    /// Data de fechamento (timestamp em milissegundos)
    #[serde(default, deserialize_with = "deserialize_millis")]
    pub date_closed: Option<i64>,

    /// Campos personalizados; entradas malformadas são descartadas
    #[serde(default, deserialize_with = "deserialize_custom_fields")]
    pub custom_fields: Vec<CustomField>,
}

/// Página de resultados da listagem de tarefas
///
/// `tasks` ausente ou `null` conta como página vazia (fim da paginação).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TasksPage {
    #[serde(default, deserialize_with = "deserialize_nullable_tasks")]
    pub tasks: Vec<Task>,
}

impl Task {
    /// Data de criação, `0` quando ausente
    pub fn created_at_ms(&self) -> i64 {
        self.date_created.unwrap_or(0)
    }
}

/// Aceita `"1699999999999"`, `1699999999999` ou `null`.
/// String vazia ou não numérica vira `None`.
fn deserialize_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(match raw {
        Some(JsonValue::String(s)) => s.trim().parse::<i64>().ok(),
        Some(JsonValue::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        _ => None,
    })
}

fn deserialize_nullable_tasks<'de, D>(deserializer: D) -> Result<Vec<Task>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Task>>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_custom_fields<'de, D>(deserializer: D) -> Result<Vec<CustomField>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<JsonValue>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|field| match serde_json::from_value::<CustomField>(field) {
            Ok(field) => Some(field),
            Err(e) => {
                tracing::debug!("Custom field ignorado (formato inesperado): {}", e);
                None
            }
        })
        .collect())
}
