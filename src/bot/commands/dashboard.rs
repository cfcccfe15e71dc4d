//! Overview screen - stats cards and the most recent products.

use crate::core::{stats::InventoryStats, table::format_amount};
use poise::serenity_prelude as serenity;

/// Builds the four stats cards as one embed.
#[must_use]
pub fn stats_embed(stats: &InventoryStats, currency_symbol: &str) -> serenity::CreateEmbed {
    serenity::CreateEmbed::default()
        .title("📦 Overview")
        .color(super::inventory::INVENTORY_COLOR)
        .field("Total Products", stats.total_products.to_string(), true)
        .field(
            "Total Value",
            format!("{currency_symbol}{}", format_amount(stats.total_value)),
            true,
        )
        .field("Low Stock Items", stats.low_stock_items.to_string(), true)
        .field("Categories", stats.categories.to_string(), true)
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::stats_embed;
    use crate::{
        bot::{BotData, commands::inventory::product_table_embed},
        core::controller::AppView,
        errors::{Error, Result},
    };

    /// Shows inventory stats and the most recent products.
    #[poise::command(slash_command)]
    pub async fn dashboard(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let (stats, recent) = {
            let mut controller = ctx.data().controller.lock().await;
            controller.select_view(AppView::Dashboard);
            let symbol = controller.currency_symbol().to_string();
            let recent: Vec<_> = controller.recent_products().iter().collect();
            (
                stats_embed(&controller.stats(), &symbol),
                product_table_embed("Recent Products", &recent, &symbol),
            )
        };

        ctx.send(poise::CreateReply::default().embed(stats).embed(recent))
            .await?;
        Ok(())
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
    fn test_stats_cards() {
        let products = vec![
            product_with("Mouse", "Electronics", 45, 850.0),
            product_with("Chair", "Furniture", 3, 12000.0),
        ];
        let stats = InventoryStats::from_products(&products);
        let embed = serde_json::to_value(stats_embed(&stats, "৳")).unwrap();

        let fields = embed["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0]["value"], "48");
        assert_eq!(fields[1]["value"], "৳74,250.00");
        assert_eq!(fields[2]["value"], "1");
        assert_eq!(fields[3]["value"], "2");
    }
}
