//! Long-polling loop for the Telegram bot

use super::{TelegramClient, TelegramResponder};
use crate::Result;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

pub const POLL_TIMEOUT_SECS: u64 = 25;
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Poll until `shutdown` resolves. Updates are answered one at a time, in order.
pub async fn run_polling<F>(
    client: Arc<TelegramClient>,
    responder: Arc<TelegramResponder>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()>,
{
    poll_loop(client, responder, shutdown, RETRY_DELAY).await
}

async fn poll_loop<F>(
    client: Arc<TelegramClient>,
    responder: Arc<TelegramResponder>,
    shutdown: F,
    retry_delay: Duration,
) -> Result<()>
where
    F: Future<Output = ()>,
{
    info!("Bot starting up...");

    match client.delete_webhook(true).await {
        Ok(()) => info!("Webhook cleared (if one existed)."),
        Err(e) => warn!(error = %e, "Could not clear webhook"),
    }

    info!("Running bot with long polling...");

    tokio::pin!(shutdown);
    let mut offset: Option<i64> = None;

    loop {
        let updates = tokio::select! {
            _ = &mut shutdown => {
                info!("Shutdown requested, stopping polling");
                return Ok(());
            }
            result = client.get_updates(offset, POLL_TIMEOUT_SECS) => result,
        };

        match updates {
            Ok(updates) => {
                for update in updates {
                    offset = Some(update.update_id + 1);

                    if let Err(e) = responder.handle_update(&update).await {
                        error!(update_id = update.update_id, error = %e, "Failed to answer update");
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "getUpdates failed, retrying");
                tokio::time::sleep(retry_delay).await;
            }
        }
    }
}
