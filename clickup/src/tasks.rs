// ============================================================================
// Task Manager - Leitura paginada de tarefas do ClickUp
// ============================================================================
//
// `GET /api/v2/list/{list_id}/task` devolve no máximo uma página por chamada.
// O filtro de criação usa `date_created_gt` / `date_created_lt`, ambos
// ESTRITOS: uma tarefa criada exatamente no limite fica de fora.
//
// Paginação: páginas a partir de 0, mesma query em todas; a primeira página
// vazia encerra. Não há limite de páginas aqui.
//
// Qualquer status não-2xx aborta a busca da lista inteira (sem retry).

use crate::client::ClickUpClient;
use crate::error::Result;
use crate::types::{Task, TasksPage};

/// Gerenciador de leitura de tarefas do ClickUp
#[derive(Clone)]
pub struct TaskManager {
    client: ClickUpClient,
}

impl TaskManager {
    pub fn new(client: ClickUpClient) -> Self {
        Self { client }
    }

    /// Busca todas as tarefas de uma lista criadas em `(created_gt, created_lt)`
    ///
    /// Inclui tarefas fechadas e subtarefas.
    pub async fn fetch_created_between(
        &self,
        list_id: &str,
        created_gt: i64,
        created_lt: i64,
    ) -> Result<Vec<Task>> {
        let endpoint = format!("/list/{}/task", urlencoding::encode(list_id));
        let mut all_tasks = Vec::new();
        let mut page: u32 = 0;

        loop {
            let query = [
                ("include_closed", "true".to_string()),
                ("subtasks", "true".to_string()),
                ("page", page.to_string()),
                ("date_created_gt", created_gt.to_string()),
                ("date_created_lt", created_lt.to_string()),
            ];

            let response: TasksPage = self.client.get_json_with_query(&endpoint, &query).await?;
            if response.tasks.is_empty() {
                break;
            }

            tracing::debug!(
                "📄 Lista {} página {}: {} tarefas",
                list_id,
                page,
                response.tasks.len()
            );
            all_tasks.extend(response.tasks);
            page += 1;
        }

        tracing::debug!(
            "📥 Lista {}: {} tarefas em {} página(s) ({} < criação < {})",
            list_id,
            all_tasks.len(),
            page,
            created_gt,
            created_lt
        );
        Ok(all_tasks)
    }

    /// Busca o mesmo intervalo em várias listas e concatena os resultados
    ///
    /// Não há de-duplicação entre listas: listas sobrepostas contam em dobro.
    pub async fn fetch_created_between_lists(
        &self,
        list_ids: &[String],
        created_gt: i64,
        created_lt: i64,
    ) -> Result<Vec<Task>> {
        let mut all_tasks = Vec::new();
        for list_id in list_ids {
            let tasks = self
                .fetch_created_between(list_id, created_gt, created_lt)
                .await?;
            all_tasks.extend(tasks);
        }
        Ok(all_tasks)
    }
}
