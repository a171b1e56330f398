//! Timesheet Discord commands - month selection, row edits and totals.
//!
//! Every edit locks the session, applies the change through the core session
//! (which persists it) and replies with the updated row and month total.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::{
            calendar::MonthKey,
            grid,
            report::{self, MonthTotals, format_currency},
            session::TimeField,
            timesheet::DayEntry,
        },
        errors::{Error, Result},
    };

    /// Discord rejects messages over 2000 characters; leave room for the code fence.
    const MESSAGE_LIMIT: usize = 1900;

    /// Shows the grid for a month, switching to it first when one is given.
    ///
    /// Without an argument the currently selected month is shown.
    #[poise::command(slash_command, prefix_command)]
    pub async fn month(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Month to open, as YYYY-MM"] month: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let rendered = {
            let mut session = data.session.lock().await;
            if let Some(raw) = month {
                let key: MonthKey = raw.parse()?;
                session.select_month(&data.database, key).await?;
            }
            grid::render_grid(session.sheet(), session.settings())?
        };

        for chunk in grid::chunk_lines(&rendered, MESSAGE_LIMIT) {
            ctx.say(format!("```\n{chunk}```")).await?;
        }
        Ok(())
    }

    /// Records worked minutes for a day. Hours and amount follow.
    #[poise::command(slash_command, prefix_command)]
    pub async fn minutes(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Day of the month"]
        #[min = 1]
        #[max = 31]
        day: u32,
        #[description = "Worked minutes"] value: String,
    ) -> Result<()> {
        edit_time(ctx, day, TimeField::Minutes, &value).await
    }

    /// Records worked decimal hours for a day. Minutes and amount follow.
    #[poise::command(slash_command, prefix_command)]
    pub async fn hours(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Day of the month"]
        #[min = 1]
        #[max = 31]
        day: u32,
        #[description = "Worked hours, e.g. 7.5"] value: String,
    ) -> Result<()> {
        edit_time(ctx, day, TimeField::Hours, &value).await
    }

    /// Sets the description for a day. Leave the text out to clear it.
    #[poise::command(slash_command, prefix_command)]
    pub async fn describe(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Day of the month"]
        #[min = 1]
        #[max = 31]
        day: u32,
        #[description = "What was worked on"]
        #[rest]
        text: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let (entry, totals) = {
            let mut session = data.session.lock().await;
            let entry = session
                .edit_description(&data.database, day, text.as_deref().unwrap_or_default())
                .await?;
            (entry, session.totals())
        };
        ctx.say(row_reply(&entry, &totals)).await?;
        Ok(())
    }

    /// Overrides the amount for a day. Leave the value out, or use 0, to go back to the computed amount.
    #[poise::command(slash_command, prefix_command)]
    pub async fn amount(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Day of the month"]
        #[min = 1]
        #[max = 31]
        day: u32,
        #[description = "Amount in EUR"] value: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let (entry, totals) = {
            let mut session = data.session.lock().await;
            let entry = session
                .edit_amount(&data.database, day, value.as_deref().unwrap_or_default())
                .await?;
            (entry, session.totals())
        };

        let note = if entry.is_manual_amount() {
            "✏️ Manual amount set"
        } else {
            "🔄 Amount is computed automatically"
        };
        ctx.say(format!("{note}\n{}", row_reply(&entry, &totals)))
            .await?;
        Ok(())
    }

    /// Shows the totals for the selected month.
    #[poise::command(slash_command, prefix_command)]
    pub async fn totals(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let summary = {
            let session = ctx.data().session.lock().await;
            report::format_month_summary(session.sheet(), session.settings())?
        };
        ctx.say(format!("📊 **Totals**\n```\n{summary}```")).await?;
        Ok(())
    }

    async fn edit_time(
        ctx: poise::Context<'_, BotData, Error>,
        day: u32,
        field: TimeField,
        value: &str,
    ) -> Result<()> {
        let data = ctx.data();
        let (entry, totals) = {
            let mut session = data.session.lock().await;
            let entry = session.edit_time(&data.database, day, field, value).await?;
            (entry, session.totals())
        };
        ctx.say(row_reply(&entry, &totals)).await?;
        Ok(())
    }

    fn row_reply(entry: &DayEntry, totals: &MonthTotals) -> String {
        format!(
            "```\n{}\nTOTAL {} min | {} h | {}\n```",
            grid::render_row(entry),
            totals.total_minutes,
            totals.hours_display(),
            format_currency(totals.total_amount)
        )
    }
}

// Re-export all commands
pub use inner::*;
