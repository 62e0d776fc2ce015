use market_commentary_assistant::{
    agent::Orchestrator,
    config::Settings,
    error::AssistantError,
    llm::build_generator,
    logging::init_tracing,
    news::MockNewsSource,
    policy::PolicyConfig,
    telegram::{run_polling, TelegramClient, TelegramResponder},
};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    init_tracing(&settings.log_level);

    let token = settings.telegram_bot_token.clone().ok_or_else(|| {
        AssistantError::Configuration(
            "TELEGRAM_BOT_TOKEN missing. Put it in your .env file.".to_string(),
        )
    })?;

    info!(provider = ?settings.llm_provider, "Market Commentary Assistant - Telegram bot");

    let policy = Arc::new(PolicyConfig::standard()?);
    let orchestrator = Arc::new(Orchestrator::new(
        policy,
        build_generator(&settings)?,
        Arc::new(MockNewsSource),
    ));

    let client = Arc::new(TelegramClient::new(token, settings.telegram_timeout_secs)?);
    let responder = Arc::new(TelegramResponder::new(client.clone(), orchestrator));

    run_polling(client, responder, shutdown_signal()).await?;

    info!("Bot stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Ctrl-C handler unavailable; running until killed");
        std::future::pending::<()>().await;
    }
}
