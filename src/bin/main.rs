use market_commentary_assistant::{
    agent::Orchestrator,
    config::Settings,
    llm::build_generator,
    logging::init_tracing,
    news::MockNewsSource,
    policy::PolicyConfig,
};
use std::sync::Arc;
use tracing::info;

/// One-shot CLI: `assistant <message...>`
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    init_tracing(&settings.log_level);

    let message = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if message.trim().is_empty() {
        eprintln!("usage: assistant <message>");
        eprintln!("example: assistant \"Why is the market down today?\"");
        std::process::exit(2);
    }

    let orchestrator = Orchestrator::new(
        Arc::new(PolicyConfig::standard()?),
        build_generator(&settings)?,
        Arc::new(MockNewsSource),
    );

    info!(provider = ?settings.llm_provider, "Running pipeline");

    match orchestrator.handle(&message).await {
        Ok(outcome) => {
            println!("\n=== {} ===\n", outcome.mode);
            println!("{}", outcome.response);
            Ok(())
        }
        Err(e) => {
            eprintln!("Pipeline failed: {}", e);
            Err(Box::new(e) as Box<dyn std::error::Error>)
        }
    }
}
