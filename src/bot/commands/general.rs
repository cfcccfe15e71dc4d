//! General Discord commands - ping and help.
//! These don't touch the inventory.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**SmartInventory Help**\n\
        Track stock, value and descriptions of your products, with an AI assistant on hand.\n\n\
        **Overview**\n\
        • `/dashboard` - Stats cards and the most recent products.\n\n\
        **Product Management**\n\
        • `/inventory list [search]` - Shows products, filtered by name or category.\n\
        • `/inventory add <name> <price> [quantity] [category] [description] [autofill]` - Adds a product.\n\
        • `/inventory edit <product> [fields...] [autofill]` - Edits a product.\n\
        • `/inventory delete <product>` - Deletes a product after confirmation.\n\
        • `/inventory export [search]` - Downloads a PDF report of the listed products.\n\n\
        **AI Insights**\n\
        • `/ask [question]` - Asks the assistant about your stock.\n\n\
        **Data Management**\n\
        • `/backup` - Downloads the whole inventory as JSON.\n\
        • `/restore <file>` - Replaces the inventory with a backup file.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
