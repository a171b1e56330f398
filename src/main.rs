use chrono::Local;
use dotenvy::dotenv;
use std::env;
use timesheet_buddy::{
    bot::{self, BotData},
    config::{database, payment},
    core::session::TimesheetSession,
    errors::{Error, Result},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Payment defaults from config.toml
    let default_settings = payment::load_default_settings()
        .inspect(|s| info!("Loaded payment defaults ({} mode)", s.mode))
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Initialize database
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Restore the last session
    let session = TimesheetSession::load(&db, default_settings, Local::now().date_naive())
        .await
        .inspect(|s| info!("Resuming {}", s.month().label()))
        .inspect_err(|e| error!("Failed to restore session: {}", e))?;

    // 6. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, BotData::new(db, session)).await
}
