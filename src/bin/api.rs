use market_commentary_assistant::{
    agent::Orchestrator,
    api::{create_router, start_server},
    config::Settings,
    llm::build_generator,
    logging::init_tracing,
    news::MockNewsSource,
    policy::PolicyConfig,
    telegram::{TelegramClient, TelegramResponder},
};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env + settings
    let settings = Settings::load()?;

    // Initialize tracing
    init_tracing(&settings.log_level);

    info!("Market Commentary Assistant - API Server");
    info!(address = %settings.bind_address(), provider = ?settings.llm_provider, "Configuration loaded");

    // Policy is loaded once and shared read-only
    let policy = Arc::new(PolicyConfig::standard()?);
    let generator = build_generator(&settings)?;
    let orchestrator = Arc::new(Orchestrator::new(
        policy,
        generator,
        Arc::new(MockNewsSource),
    ));

    let telegram = match settings.telegram_bot_token.clone() {
        Some(token) => {
            let client = Arc::new(TelegramClient::new(token, settings.telegram_timeout_secs)?);
            info!("Telegram webhook enabled at /telegram/webhook");
            Some(Arc::new(TelegramResponder::new(client, orchestrator.clone())))
        }
        None => {
            warn!("TELEGRAM_BOT_TOKEN not set; /telegram/webhook will reject updates");
            None
        }
    };

    let router = create_router(orchestrator, telegram);

    start_server(router, &settings.bind_address(), shutdown_signal()).await?;

    info!("API Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Ctrl-C handler unavailable; running until killed");
        std::future::pending::<()>().await;
    }
}
