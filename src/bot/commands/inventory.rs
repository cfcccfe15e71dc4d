//! Product management commands - list, add, edit, delete and export.
//!
//! Add and edit go through the controller's product form so that they share
//! validation and the optional assistant auto fill with every other front end.

use crate::core::{
    product::Product,
    table::{EMPTY_TABLE_HINT, EMPTY_TABLE_TITLE, inventory_rows, preview},
};
use poise::serenity_prelude as serenity;

/// Embeds can hold at most 25 fields.
const MAX_EMBED_ROWS: usize = 25;

/// Discord's limits on embed field names and values, in characters.
const MAX_FIELD_NAME: usize = 256;
const MAX_FIELD_VALUE: usize = 1024;

/// Accent colour shared by all inventory embeds.
pub const INVENTORY_COLOR: u32 = 0x0025_63EB;

/// Renders a product table as an embed, one field per product.
#[must_use]
pub fn product_table_embed(title: &str, products: &[&Product], currency_symbol: &str) -> serenity::CreateEmbed {
    let embed = serenity::CreateEmbed::default()
        .title(title)
        .color(INVENTORY_COLOR);

    if products.is_empty() {
        return embed.description(format!("**{EMPTY_TABLE_TITLE}**\n{EMPTY_TABLE_HINT}"));
    }

    let rows = inventory_rows(products.iter().copied(), currency_symbol);
    let hidden = rows.len().saturating_sub(MAX_EMBED_ROWS);
    let fields = rows.into_iter().take(MAX_EMBED_ROWS).map(|row| {
        let mut value = format!(
            "Qty: **{}** · {} · {}",
            row.quantity, row.price, row.status
        );
        if !row.description.is_empty() {
            value.push('\n');
            value.push_str(&row.description);
        }
        (
            preview(&format!("{} ({})", row.name, row.category), MAX_FIELD_NAME),
            preview(&value, MAX_FIELD_VALUE),
            false,
        )
    });

    let embed = embed.fields(fields);
    if hidden > 0 {
        embed.footer(serenity::CreateEmbedFooter::new(format!(
            "…and {hidden} more. Narrow the list with a search."
        )))
    } else {
        embed
    }
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::{INVENTORY_COLOR, product_table_embed};
    use crate::{
        bot::{BotData, handlers::autocomplete, user_message},
        core::{
            assistant::AssistantClient,
            controller::{AppView, AutofillRequest, ViewController},
            product::Product,
            store::Confirmation,
            table::format_amount,
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::time::Duration;
    use tracing::info;

    /// How long the delete buttons stay active.
    const CONFIRM_TIMEOUT: Duration = Duration::from_secs(60);

    /// Parent command for product management.
    #[poise::command(
        slash_command,
        subcommands(
            "inventory_list",
            "inventory_add",
            "inventory_edit",
            "inventory_delete",
            "inventory_export"
        )
    )]
    pub async fn inventory(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Product management command. Available subcommands:\n\
            `/inventory list` - List or search products\n\
            `/inventory add` - Add a new product\n\
            `/inventory edit` - Edit a product\n\
            `/inventory delete` - Delete a product\n\
            `/inventory export` - Download a PDF report";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Lists products, optionally filtered by name or category.
    #[poise::command(slash_command, rename = "list")]
    pub async fn inventory_list(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Search by name or category"] search: Option<String>,
    ) -> Result<()> {
        let embed = {
            let mut controller = ctx.data().controller.lock().await;
            controller.select_view(AppView::Inventory);
            controller.set_search(search.unwrap_or_default());
            let title = if controller.search().is_empty() {
                AppView::Inventory.title().to_string()
            } else {
                format!("{} - \"{}\"", AppView::Inventory.title(), controller.search())
            };
            product_table_embed(
                &title,
                &controller.filtered_products(),
                controller.currency_symbol(),
            )
        };

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Adds a new product.
    ///
    /// With `autofill` set, the assistant replaces the category and
    /// description with its own suggestion.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "add")]
    pub async fn inventory_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product name"] name: String,
        #[description = "Unit price"] price: f64,
        #[description = "Units in stock (defaults to 0)"] quantity: Option<u32>,
        #[description = "Category (defaults to General)"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: Option<String>,
        #[description = "Short description"] description: Option<String>,
        #[description = "Let the assistant suggest category and description"] autofill: Option<
            bool,
        >,
    ) -> Result<()> {
        ctx.defer().await?;

        let progress = {
            let mut controller = ctx.data().controller.lock().await;
            controller.select_view(AppView::Inventory);
            controller.open_add_form();
            let form = controller.form_mut()?;
            form.name = name;
            form.price = price;
            form.quantity = quantity.unwrap_or(0);
            form.category = category.unwrap_or_default();
            form.description = description.unwrap_or_default();
            advance_form(&mut controller, autofill.unwrap_or(false)).await
        };

        reply_with_form(ctx, progress, "✅ Added").await
    }

    /// Edits an existing product. Fields left out keep their current value.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "edit")]
    pub async fn inventory_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product to edit"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product: String,
        #[description = "New name"] name: Option<String>,
        #[description = "New unit price"] price: Option<f64>,
        #[description = "New quantity"] quantity: Option<u32>,
        #[description = "New category"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: Option<String>,
        #[description = "New description"] description: Option<String>,
        #[description = "Let the assistant suggest category and description"] autofill: Option<
            bool,
        >,
    ) -> Result<()> {
        ctx.defer().await?;

        let progress = {
            let mut controller = ctx.data().controller.lock().await;
            controller.select_view(AppView::Inventory);
            let Some(id) = controller.store().find_by_name(&product).map(|p| p.id.clone()) else {
                ctx.say(format!("❌ Product '{product}' not found.")).await?;
                return Ok(());
            };
            controller.open_edit_form(&id)?;
            let form = controller.form_mut()?;
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(price) = price {
                form.price = price;
            }
            if let Some(quantity) = quantity {
                form.quantity = quantity;
            }
            if let Some(category) = category {
                form.category = category;
            }
            if let Some(description) = description {
                form.description = description;
            }
            advance_form(&mut controller, autofill.unwrap_or(false)).await
        };

        reply_with_form(ctx, progress, "✅ Updated").await
    }

    /// Deletes a product after the user confirms with a button.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn inventory_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product to delete"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product: String,
    ) -> Result<()> {
        let target = {
            let mut controller = ctx.data().controller.lock().await;
            let Some(id) = controller.store().find_by_name(&product).map(|p| p.id.clone()) else {
                ctx.say(format!("❌ Product '{product}' not found.")).await?;
                return Ok(());
            };
            controller.request_delete(&id)?
        };

        let ctx_id = ctx.id();
        let delete_id = format!("{ctx_id}delete");
        let cancel_id = format!("{ctx_id}cancel");
        let buttons = serenity::CreateActionRow::Buttons(vec![
            serenity::CreateButton::new(&delete_id)
                .label("Delete")
                .style(serenity::ButtonStyle::Danger),
            serenity::CreateButton::new(&cancel_id)
                .label("Cancel")
                .style(serenity::ButtonStyle::Secondary),
        ]);
        let reply = ctx
            .send(
                poise::CreateReply::default()
                    .content(format!(
                        "Are you sure you want to delete **{}**?",
                        target.name
                    ))
                    .components(vec![buttons]),
            )
            .await?;

        let author_id = ctx.author().id;
        let prefix = ctx_id.to_string();
        let press = serenity::ComponentInteractionCollector::new(ctx.serenity_context())
            .author_id(author_id)
            .filter(move |press| press.data.custom_id.starts_with(&prefix))
            .timeout(CONFIRM_TIMEOUT)
            .await;

        let confirmation = match &press {
            Some(press) if press.data.custom_id == delete_id => Confirmation::Confirmed,
            _ => Confirmation::Declined,
        };
        let removed = ctx
            .data()
            .controller
            .lock()
            .await
            .resolve_delete(&target.id, confirmation)
            .await?;

        let outcome = match (&removed, &press) {
            (Some(product), _) => format!("🗑️ Deleted **{}**.", product.name),
            (None, Some(_)) => format!("Kept **{}**.", target.name),
            (None, None) => format!("No answer, kept **{}**.", target.name),
        };

        if let Some(press) = press {
            press
                .create_response(
                    ctx.serenity_context(),
                    serenity::CreateInteractionResponse::UpdateMessage(
                        serenity::CreateInteractionResponseMessage::new()
                            .content(outcome)
                            .components(Vec::new()),
                    ),
                )
                .await?;
        } else {
            reply
                .edit(
                    ctx,
                    poise::CreateReply::default()
                        .content(outcome)
                        .components(Vec::new()),
                )
                .await?;
        }
        Ok(())
    }

    /// Downloads a PDF report of the listed products.
    #[poise::command(slash_command, rename = "export")]
    pub async fn inventory_export(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only include products matching this search"] search: Option<String>,
    ) -> Result<()> {
        ctx.defer().await?;

        let (file, count) = {
            let mut controller = ctx.data().controller.lock().await;
            if let Some(search) = search {
                controller.set_search(search);
            }
            let count = controller.filtered_products().len();
            (controller.export_report(chrono::Utc::now())?, count)
        };

        info!("Sending report with {count} products");
        ctx.send(
            poise::CreateReply::default()
                .content(format!("📄 Inventory report ({count} products)"))
                .attachment(serenity::CreateAttachment::bytes(file.bytes, file.filename)),
        )
        .await?;
        Ok(())
    }

    /// Where a filled-in form stands once the command has let go of the controller.
    enum FormProgress {
        /// Saved, or rejected and closed
        Done(Result<Product>),
        /// Waiting on the assistant; saved only if the same form is still open
        Autofill(AutofillRequest, AssistantClient),
    }

    /// Saves the freshly filled form, or starts its auto fill. Runs under the
    /// same lock that filled the form so no other command can swap it out.
    async fn advance_form(controller: &mut ViewController, autofill: bool) -> FormProgress {
        if !autofill {
            return FormProgress::Done(save_or_close(controller).await);
        }
        match controller.begin_autofill() {
            Ok(request) => FormProgress::Autofill(request, controller.assistant().clone()),
            Err(e) => {
                controller.close_form();
                FormProgress::Done(Err(e))
            }
        }
    }

    async fn save_or_close(controller: &mut ViewController) -> Result<Product> {
        let saved = controller.save_form().await;
        if saved.is_err() {
            controller.close_form();
        }
        saved
    }

    /// Finishes a pending auto fill, then reports the saved product. The
    /// controller is unlocked while the assistant is working.
    async fn reply_with_form(
        ctx: poise::Context<'_, BotData, Error>,
        progress: FormProgress,
        verb: &str,
    ) -> Result<()> {
        let saved = match progress {
            FormProgress::Done(saved) => saved,
            FormProgress::Autofill(request, assistant) => {
                let suggestion = assistant.suggest_details(&request.name).await;
                let mut controller = ctx.data().controller.lock().await;
                // A stale token means another command owns the open form now
                match controller.finish_autofill(request.token, suggestion) {
                    Ok(()) => save_or_close(&mut controller).await,
                    Err(e) => Err(e),
                }
            }
        };

        match saved {
            Ok(product) => {
                let symbol = &ctx.data().settings.inventory.currency_symbol;
                ctx.send(poise::CreateReply::default().embed(product_embed(&product, verb, symbol)))
                    .await?;
            }
            Err(e) => {
                ctx.say(user_message(e)?).await?;
            }
        }
        Ok(())
    }

    fn product_embed(product: &Product, verb: &str, symbol: &str) -> serenity::CreateEmbed {
        let description = if product.description.is_empty() {
            "-".to_string()
        } else {
            product.description.clone()
        };
        serenity::CreateEmbed::default()
            .title(format!("{verb} {}", product.name))
            .color(INVENTORY_COLOR)
            .field("Category", &product.category, true)
            .field("Quantity", product.quantity.to_string(), true)
            .field("Price", format!("{symbol}{}", format_amount(product.price)), true)
            .field("Description", description, false)
    }
}

// Re-export all commands
pub use inner::*;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::product_with;

    #[test]
    fn test_empty_table_shows_empty_state() {
        let embed = serde_json::to_value(product_table_embed("Inventory", &[], "৳")).unwrap();
        let description = embed["description"].as_str().unwrap();
        assert!(description.contains("No products found"));
        assert!(description.contains("Add a new product to get started."));
    }

    #[test]
    fn test_rows_show_status_and_price() {
        let chair = product_with("Office Chair", "Furniture", 3, 12000.0);
        let embed = serde_json::to_value(product_table_embed("Inventory", &[&chair], "৳")).unwrap();
        let field = &embed["fields"][0];
        assert_eq!(field["name"], "Office Chair (Furniture)");
        let value = field["value"].as_str().unwrap();
        assert!(value.contains("৳12,000.00"));
        assert!(value.contains("Low Stock"));
    }

    #[test]
    fn test_long_names_fit_field_limits() {
        let name = "x".repeat(300);
        let description = "d".repeat(1500);
        let mut product = product_with(&name, "Bulk", 1, 1.0);
        product.description = description;
        let embed = serde_json::to_value(product_table_embed("Inventory", &[&product], "৳")).unwrap();
        let field = &embed["fields"][0];
        let field_name = field["name"].as_str().unwrap();
        assert_eq!(field_name.chars().count(), MAX_FIELD_NAME);
        assert!(field_name.ends_with('…'));
        assert!(field["value"].as_str().unwrap().chars().count() <= MAX_FIELD_VALUE);
    }

    #[test]
    fn test_large_table_is_capped() {
        let products: Vec<Product> = (0..30)
            .map(|i| product_with(&format!("Item {i}"), "Bulk", i, 1.0))
            .collect();
        let refs: Vec<&Product> = products.iter().collect();
        let embed = serde_json::to_value(product_table_embed("Inventory", &refs, "৳")).unwrap();
        assert_eq!(embed["fields"].as_array().unwrap().len(), MAX_EMBED_ROWS);
        assert!(embed["footer"]["text"].as_str().unwrap().contains("5 more"));
    }
}
