//! Cliente da API ClickUp v2 voltado a relatórios
//!
//! Este crate fornece uma interface tipo-segura para ler tarefas do ClickUp:
//!
//! - Cliente HTTP com timeout e tratamento de status (`client`)
//! - Tipos de leitura tolerantes a variações de formato (`types`)
//! - Busca paginada por intervalo de criação (`tasks`)
//!
//! # Exemplo Básico
//!
//! ```rust,ignore
//! use clickup::{ClickUpClient, tasks::TaskManager};
//!
//! #[tokio::main]
//! async fn main() -> clickup::Result<()> {
//!     // IMPORTANTE: Ler de variáveis de ambiente (NUNCA hardcode!)
//!     let api_token = std::env::var("CLICKUP_TOKEN")
//!         .expect("CLICKUP_TOKEN não configurado");
//!
//!     let manager = TaskManager::new(ClickUpClient::new(api_token)?);
//!     let tasks = manager.fetch_created_between("205073978", 0, i64::MAX).await?;
//!     println!("{} tarefas", tasks.len());
//!
//!     Ok(())
//! }
//! ```

// Módulos públicos
pub mod client;
pub mod error;
pub mod tasks;
pub mod types;

// Re-exports principais
pub use client::ClickUpClient;
pub use error::{ClickUpError, Result};
pub use tasks::TaskManager;
pub use types::{CustomField, FieldOption, Task, TypeConfig};
