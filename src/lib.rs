// Biblioteca do relatório de tasks por produto (ClickUp → Slack)
// Expõe módulos para uso em testes e no binário

pub mod config;
pub mod services;
pub mod utils;
