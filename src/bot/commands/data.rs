//! Data management commands - JSON backup and restore.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, user_message},
        core::backup::RESTORE_SUCCESS_MESSAGE,
        errors::{Error, RestoreError, Result},
    };
    use poise::serenity_prelude as serenity;
    use tracing::warn;

    /// Downloads the whole inventory as a JSON backup.
    #[poise::command(slash_command)]
    pub async fn backup(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let (file, count) = {
            let controller = ctx.data().controller.lock().await;
            (controller.backup(chrono::Utc::now())?, controller.products().len())
        };

        ctx.send(
            poise::CreateReply::default()
                .content(format!("💾 Backup of {count} products"))
                .attachment(serenity::CreateAttachment::bytes(file.bytes, file.filename)),
        )
        .await?;
        Ok(())
    }

    /// Replaces the whole inventory with the contents of a backup file.
    #[poise::command(slash_command)]
    pub async fn restore(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "A backup file created with /backup"] file: serenity::Attachment,
    ) -> Result<()> {
        ctx.defer().await?;

        let contents = match file.download().await {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to download backup attachment {}: {e:?}", file.filename);
                let error = Error::Restore(RestoreError::Unreadable {
                    detail: e.to_string(),
                });
                ctx.say(user_message(error)?).await?;
                return Ok(());
            }
        };

        let restored = ctx.data().controller.lock().await.restore(&contents).await;
        match restored {
            Ok(count) => {
                ctx.say(format!("✅ {RESTORE_SUCCESS_MESSAGE} ({count} products)"))
                    .await?;
            }
            Err(e) => {
                ctx.say(user_message(e)?).await?;
            }
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
