//! Tipos do ClickUp API
//!
//! - **Task**: tarefa com datas e custom fields
//! - **CustomField**: campo personalizado, com opções de dropdown/labels
//!
//! ## ⚠️ Notas Importantes
//!
//! - **Timestamps**: Sempre em milissegundos, podem vir como string ou número

pub mod custom_field;
pub mod task;

pub use custom_field::{CustomField, FieldOption, TypeConfig};
pub use task::{Task, TasksPage};
