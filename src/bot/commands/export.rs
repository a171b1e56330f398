//! Export Discord command - download the selected month as a file.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::export::ExportFormat,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Sends the selected month as a CSV, HTML, Word, Excel or PDF attachment.
    #[poise::command(slash_command, prefix_command)]
    pub async fn export(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "File format"]
        #[autocomplete = "autocomplete::autocomplete_export_format"]
        format: String,
    ) -> Result<()> {
        let format: ExportFormat = format.parse()?;

        // PDF layout can take a moment
        ctx.defer().await?;

        let file = {
            let session = ctx.data().session.lock().await;
            session.export(format)?
        };

        let content = format!("📎 {} ({})", file.filename, file.mime_type);
        let attachment = serenity::CreateAttachment::bytes(file.bytes, file.filename);
        ctx.send(
            poise::CreateReply::default()
                .content(content)
                .attachment(attachment),
        )
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
