//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for `SmartInventory`, including
//! all slash commands, autocomplete handlers, and the shared bot context.
//! Every command goes through the single [`ViewController`] held in
//! [`BotData`].

/// Discord command implementations (dashboard, inventory, assistant, data, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    config::settings::Settings,
    core::controller::ViewController,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
///
/// The controller sits behind an async mutex. Commands that call the remote
/// assistant release the lock while the request is outstanding.
pub struct BotData {
    /// Session state and all inventory operations
    pub controller: Mutex<ViewController>,
    /// Settings loaded at startup
    pub settings: Settings,
}

impl BotData {
    /// Creates a new `BotData` around an initialized controller.
    #[must_use]
    pub fn new(controller: ViewController, settings: Settings) -> Self {
        Self {
            controller: Mutex::new(controller),
            settings,
        }
    }
}

/// Turns an error the user can act on into a reply; anything else is passed
/// back so the framework logs it.
///
/// # Errors
/// Returns `error` unchanged when it is not a user mistake.
pub fn user_message(error: Error) -> Result<String> {
    match error {
        Error::Validation { .. }
        | Error::InvalidAmount { .. }
        | Error::ProductNotFound { .. }
        | Error::RequestPending { .. }
        | Error::NoOpenForm
        | Error::StaleForm
        | Error::Restore(_) => Ok(format!("❌ {error}")),
        other => Err(other),
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {error:?}", ctx.command().name);
            if let Err(e) = ctx.say(format!("An error occurred: {error}")).await {
                error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Registers all commands and runs the Discord client until it stops.
///
/// # Errors
/// Returns a framework error if the client cannot be created or the gateway
/// connection fails.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::dashboard(),
                commands::inventory(),
                commands::ask(),
                commands::backup(),
                commands::restore(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    // Slash commands only, so no privileged intents are needed
    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {e:?}"))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {e:?}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RestoreError;

    #[test]
    fn test_user_message_for_fixable_errors() {
        let message = user_message(Error::Restore(RestoreError::NotASequence));
        assert_eq!(message.ok().as_deref(), Some("❌ Invalid file format."));

        let busy = user_message(Error::RequestPending { operation: "chat" });
        assert!(busy.is_ok());

        let stale = user_message(Error::StaleForm);
        assert!(stale.is_ok_and(|text| text.starts_with("❌ ")));
    }

    #[test]
    fn test_user_message_passes_through_failures() {
        let io = Error::Io(std::io::Error::other("disk full"));
        assert!(matches!(user_message(io), Err(Error::Io(_))));
    }
}
