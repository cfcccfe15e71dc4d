//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions come from the live product collection, so they follow every
//! add, edit, delete and restore.

use crate::{bot::BotData, core::controller::CATEGORY_OPTIONS, errors::Error};
use std::collections::BTreeSet;

/// Discord shows at most 25 suggestions.
const MAX_SUGGESTIONS: usize = 25;

/// Keeps the candidates containing `partial` (case-insensitive), sorted.
fn matching(candidates: impl IntoIterator<Item = String>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    candidates
        .into_iter()
        .filter(|candidate| candidate.to_lowercase().contains(&partial_lower))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Provides autocomplete suggestions for product names.
pub async fn autocomplete_product_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let names = ctx.data().controller.lock().await.store().product_names();
    matching(names, partial)
}

/// Provides autocomplete suggestions for categories: the usual ones plus
/// every category already in use.
pub async fn autocomplete_category(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let in_use = ctx.data().controller.lock().await.store().categories();
    let candidates = CATEGORY_OPTIONS
        .iter()
        .map(|&c| c.to_string())
        .chain(in_use);
    matching(candidates, partial)
}
