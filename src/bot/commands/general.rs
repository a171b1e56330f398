//! General Discord commands - ping and help.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Checks the bot is responsive and reports the selected month.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let label = ctx.data().session.lock().await.month().label();
        ctx.say(format!("Pong! Editing {label}.")).await?;
        Ok(())
    }

    /// Lists every command and its arguments.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**TimesheetBuddy Help**\n\
        Here is a summary of all available commands for TimesheetBuddy.\n\n\
        **Timesheet Commands**\n\
        • `/month [YYYY-MM]` - Shows the grid, switching month when one is given.\n\
        • `/minutes <day> <value>` - Records worked minutes for a day.\n\
        • `/hours <day> <value>` - Records worked decimal hours for a day.\n\
        • `/describe <day> [text]` - Sets or clears a day's description.\n\
        • `/amount <day> [value]` - Overrides a day's amount; empty or 0 goes back to automatic.\n\
        • `/totals` - Shows the month's minutes, hours and amount.\n\n\
        **Settings & Export**\n\
        • `/settings [mode] [hourly_rate] [monthly_pay] [min_daily_hours] [show_hour_difference]` - Shows or changes payment settings.\n\
        • `/export <format>` - Downloads the month as csv, html, word, excel or pdf.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
