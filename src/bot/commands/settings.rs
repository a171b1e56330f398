//! Settings Discord command - view or change the payment policy.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{
            pay::{PaymentMode, PaymentSettings, SettingsUpdate},
            report::{format_currency, format_hours},
        },
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Shows the payment settings, or changes the ones given.
    ///
    /// Changing the mode, rate, monthly pay or threshold re-evaluates every
    /// automatically computed amount in the selected month. Manual amounts stay.
    #[poise::command(slash_command, prefix_command)]
    pub async fn settings(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Payment mode: hourly or daily"]
        #[autocomplete = "autocomplete::autocomplete_payment_mode"]
        mode: Option<String>,
        #[description = "Pay per hour in EUR"] hourly_rate: Option<f64>,
        #[description = "Monthly pay in EUR (daily mode)"] monthly_pay: Option<f64>,
        #[description = "Hours a day must reach to earn the daily rate"]
        min_daily_hours: Option<f64>,
        #[description = "Show worked minus expected hours (daily mode)"]
        show_hour_difference: Option<bool>,
    ) -> Result<()> {
        let update = SettingsUpdate {
            mode: mode.as_deref().map(str::parse::<PaymentMode>).transpose()?,
            hourly_rate,
            monthly_pay,
            min_daily_hours,
            show_hour_difference,
        };

        let data = ctx.data();
        let (settings, daily_rate) = {
            let mut session = data.session.lock().await;
            let month = session.month();
            let settings = session.update_settings(&data.database, &update).await?;
            (settings.clone(), settings.daily_rate(month))
        };

        let heading = if update.is_empty() {
            "⚙️ **Payment settings**"
        } else {
            "✅ **Payment settings updated**"
        };
        ctx.say(format!("{heading}\n{}", describe_settings(&settings, daily_rate)?))
            .await?;
        Ok(())
    }

    fn describe_settings(
        settings: &PaymentSettings,
        daily_rate: f64,
    ) -> std::result::Result<String, std::fmt::Error> {
        let mut text = String::new();
        writeln!(text, "Mode: {}", settings.mode)?;
        writeln!(text, "Hourly rate: {}", format_currency(settings.hourly_rate))?;
        if settings.mode == PaymentMode::DailyMinimum {
            writeln!(text, "Monthly pay: {}", format_currency(settings.monthly_pay))?;
            writeln!(
                text,
                "Minimum daily hours: {}",
                format_hours(settings.min_daily_hours)
            )?;
            writeln!(text, "Daily rate this month: {}", format_currency(daily_rate))?;
            writeln!(
                text,
                "Hour difference: {}",
                if settings.show_hour_difference {
                    "shown"
                } else {
                    "hidden"
                }
            )?;
        }
        Ok(text)
    }
}

// Re-export all commands
pub use inner::*;
