use tracing::{debug, info, warn};

pub fn log_config_loaded(run_mode: &str, list_count: usize, variant: &str) {
    info!(
        "Configuration loaded successfully for environment: {} ({} lista(s), relatório {})",
        run_mode, list_count, variant
    );
}

pub fn log_window_fetched(window: &str, task_count: usize) {
    info!("📥 Janela {}: {} tarefas", window, task_count);
}

pub fn log_counts(column: &str, categories: usize, total: usize) {
    debug!("🔢 Coluna {}: {} produtos, total {}", column, categories, total);
}

pub fn log_outside_send_window(local_time: &str, start_hour: u32, end_hour: u32) {
    info!(
        "⏰ {} fora da janela de envio ({:02}h–{:02}h), nada a fazer",
        local_time, start_hour, end_hour
    );
}

pub fn log_slack_published(channel: &str, ts: Option<&str>) {
    info!("✅ Relatório publicado no Slack: canal {} (ts: {})", channel, ts.unwrap_or("?"));
}

pub fn log_slack_rejected(channel: &str, body: &str) {
    warn!("❌ Slack recusou a mensagem para o canal {}: {}", channel, body);
}
