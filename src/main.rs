/// Relatório agendado: tasks do ClickUp por produto → Slack
///
/// Execução única por invocação (cron externo):
/// - Fora da janela de envio: imprime aviso e sai com sucesso
/// - Dentro: busca, conta, renderiza e publica; qualquer erro sai com status != 0
use chrono::Utc;
use tracing_subscriber::EnvFilter;

use clickup_produto_report::config::Settings;
use clickup_produto_report::services::ReportRunner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 🔧 Carregar variáveis de ambiente do arquivo .env (se existir)
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    // Inicializar tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if dotenv_loaded {
        tracing::info!("✅ Arquivo .env carregado com sucesso");
    } else {
        tracing::debug!("Arquivo .env não encontrado - usando variáveis de ambiente do sistema");
    }

    // Carregar configurações (falha antes de qualquer chamada de rede)
    let settings = Settings::new()?;
    let runner = ReportRunner::new(settings)?;

    let now = Utc::now().with_timezone(&runner.timezone()?);
    let outcome = runner.run(now).await?;

    println!("{}", outcome.status_line());
    Ok(())
}
