//! AI Insights - chat with the remote assistant about the inventory.

use crate::core::{
    chat::{ChatMessage, ChatRole, EXAMPLE_QUESTIONS},
    table::preview,
};

/// Messages shown when replaying the conversation.
const HISTORY_LIMIT: usize = 10;

/// Longest single message shown when replaying the conversation.
const MESSAGE_PREVIEW_CHARS: usize = 300;

/// The latest messages as Markdown lines, or the example questions when
/// nothing has been asked yet.
#[must_use]
pub fn conversation_text(history: &[ChatMessage]) -> String {
    let mut text = String::new();
    if history.is_empty() {
        text.push_str("Ask me anything about your inventory!\n");
        for example in EXAMPLE_QUESTIONS {
            text.push_str(&format!("• \"{example}\"\n"));
        }
        return text;
    }

    let start = history.len().saturating_sub(HISTORY_LIMIT);
    for message in &history[start..] {
        let who = match message.role {
            ChatRole::User => "**You**",
            ChatRole::Model => "**Assistant**",
        };
        text.push_str(&format!(
            "{who} ({}): {}\n",
            message.timestamp.format("%H:%M"),
            preview(&message.text, MESSAGE_PREVIEW_CHARS)
        ));
    }
    text
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::conversation_text;
    use crate::{
        bot::{BotData, user_message},
        core::{controller::AppView, table::preview},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Embed descriptions are capped at 4096 characters.
    const MAX_ANSWER_CHARS: usize = 4000;

    const ASSISTANT_COLOR: u32 = 0x007C_3AED;

    /// Asks the assistant about your stock. Without a question, shows the conversation so far.
    #[poise::command(slash_command)]
    pub async fn ask(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "e.g. Which items are low on stock?"] question: Option<String>,
    ) -> Result<()> {
        let Some(question) = question else {
            return show_conversation(ctx).await;
        };

        ctx.defer().await?;

        let (request, assistant) = {
            let mut controller = ctx.data().controller.lock().await;
            controller.select_view(AppView::Assistant);
            match controller.begin_chat(&question) {
                Ok(request) => (request, controller.assistant().clone()),
                Err(e) => {
                    ctx.say(user_message(e)?).await?;
                    return Ok(());
                }
            }
        };

        // The controller stays unlocked while the model is thinking
        let answer = assistant
            .analyze_inventory(&request.products, &request.query)
            .await;

        let model = assistant.model().to_string();
        let text = {
            let mut controller = ctx.data().controller.lock().await;
            controller.finish_chat(answer).text.clone()
        };

        let embed = serenity::CreateEmbed::default()
            .title(preview(&question, 250))
            .description(preview(&text, MAX_ANSWER_CHARS))
            .color(ASSISTANT_COLOR)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "{} · {model}",
                AppView::Assistant.title()
            )));
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    async fn show_conversation(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let text = {
            let mut controller = ctx.data().controller.lock().await;
            controller.select_view(AppView::Assistant);
            conversation_text(controller.chat_history())
        };

        let embed = serenity::CreateEmbed::default()
            .title(AppView::Assistant.title())
            .description(preview(&text, MAX_ANSWER_CHARS))
            .color(ASSISTANT_COLOR);
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
