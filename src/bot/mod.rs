//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the `TimesheetBuddy` application:
//! slash commands over the editing session, autocomplete handlers and the
//! framework setup that wires them together.

/// Discord command implementations (timesheet, settings, export, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    core::session::TimesheetSession,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
/// Holds the database connection and the single editing session; commands
/// lock the session for the whole of one edit so mutations never interleave.
pub struct BotData {
    /// Database connection for all persistence
    pub database: DatabaseConnection,
    /// The active month and payment settings
    pub session: Mutex<TimesheetSession>,
}

impl BotData {
    /// Creates a new `BotData` instance around a loaded session.
    #[must_use]
    pub fn new(database: DatabaseConnection, session: TimesheetSession) -> Self {
        Self {
            database,
            session: Mutex::new(session),
        }
    }
}

/// Every command the bot registers.
#[must_use]
pub fn all_commands() -> Vec<poise::Command<BotData, Error>> {
    vec![
        commands::month(),
        commands::minutes(),
        commands::hours(),
        commands::describe(),
        commands::amount(),
        commands::totals(),
        commands::settings(),
        commands::export(),
        commands::ping(),
        commands::help(),
    ]
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("❌ {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Connects to Discord, registers the commands globally and runs until the client stops.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: all_commands(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {}", e))?;
    Ok(())
}

pub use commands::*;
pub use handlers::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_command_names_are_unique() {
        let commands = all_commands();
        let names: HashSet<String> = commands.iter().map(|c| c.name.clone()).collect();
        assert_eq!(names.len(), commands.len());
        for expected in ["month", "minutes", "hours", "describe", "amount", "settings", "export"] {
            assert!(names.contains(expected), "missing command {expected}");
        }
    }
}
