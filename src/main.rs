//! Binary entry point: configuration, wiring, webhook server.

use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use tokio::sync::RwLock;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kelp_ledger::adapters::http::{webhook_routes, WebhookState};
use kelp_ledger::adapters::sheets::{SheetsConfig, SheetsLedger};
use kelp_ledger::adapters::telegram::{TelegramConfig, TelegramTransport};
use kelp_ledger::adapters::SystemClock;
use kelp_ledger::application::handlers::{
    AmendReportHandler, ConfigureSiteHandler, DeleteRowsHandler, QuerySummaryHandler,
    SubmitReportHandler,
};
use kelp_ledger::application::Dispatcher;
use kelp_ledger::config::AppConfig;
use kelp_ledger::domain::confirm::ConfirmationRegistry;
use kelp_ledger::domain::foundation::Clock;
use kelp_ledger::domain::sites::SiteCapacityTable;
use kelp_ledger::ports::{ChatTransport, LedgerStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    config.validate()?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let policy = config.harvest.policy();

    let sites = Arc::new(RwLock::new(SiteCapacityTable::from_seed(
        config.harvest.seed_sites()?,
    )?));

    let sheets_config = SheetsConfig::new(
        config.sheet.spreadsheet_id.clone(),
        config.sheet.api_token.expose_secret().clone(),
    )
    .with_base_url(config.sheet.base_url.clone())
    .with_tab(config.sheet.tab.clone())
    .with_header_rows(config.sheet.header_rows);
    let ledger: Arc<dyn LedgerStore> = Arc::new(SheetsLedger::new(sheets_config)?);

    let telegram_config = TelegramConfig::new(config.telegram.bot_token.expose_secret().clone())
        .with_base_url(config.telegram.base_url.clone());
    let transport: Arc<dyn ChatTransport> = Arc::new(TelegramTransport::new(telegram_config)?);

    let dispatcher = Arc::new(Dispatcher::new(
        ConfirmationRegistry::new(
            clock.clone(),
            config.harvest.confirm_pin.clone(),
            config.harvest.confirm_ttl_secs,
        ),
        SubmitReportHandler::new(ledger.clone(), sites.clone(), clock.clone(), policy),
        AmendReportHandler::new(ledger.clone(), sites.clone(), clock.clone(), policy),
        DeleteRowsHandler::new(ledger.clone()),
        QuerySummaryHandler::new(ledger.clone(), sites.clone(), clock.clone(), policy),
        ConfigureSiteHandler::new(sites),
    ));

    let app = webhook_routes(
        WebhookState {
            dispatcher,
            transport,
        },
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr = config.server.socket_addr()?;
    info!(%addr, version = env!("CARGO_PKG_VERSION"), "kelp-ledger listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
