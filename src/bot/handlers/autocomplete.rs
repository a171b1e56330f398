//! Autocomplete handlers for Discord slash command parameters.

use crate::{
    bot::BotData,
    core::{export::ExportFormat, pay::PaymentMode},
    errors::Error,
};

/// Suggests payment mode names matching the partial input.
pub async fn autocomplete_payment_mode(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching(
        [PaymentMode::Hourly, PaymentMode::DailyMinimum]
            .iter()
            .map(|mode| mode.as_str()),
        partial,
    )
}

/// Suggests export format names matching the partial input.
pub async fn autocomplete_export_format(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching(ExportFormat::ALL.iter().map(|format| format.name()), partial)
}

fn matching<'a>(names: impl Iterator<Item = &'a str>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    names
        .filter(|name| name.contains(&partial_lower))
        .map(ToString::to_string)
        .collect()
}
