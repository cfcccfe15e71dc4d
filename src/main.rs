use dotenvy::dotenv;
use smart_inventory::{
    bot::{self, BotData},
    config::{database, settings},
    core::{assistant::AssistantClient, controller::ViewController, store::ProductStore},
    errors::{Error, Result},
};
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load config.toml (defaults if absent)
    let app_settings = settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load settings: {e}"))?;

    // 4. Initialize database and load the inventory
    let database_url = database::get_database_url();
    let db = database::create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {e}"))?;
    let store = ProductStore::load(db).await?;

    // 5. Build the assistant client and the session controller
    let assistant = AssistantClient::new(
        &app_settings.assistant,
        &app_settings.inventory,
        settings::api_key_from_env(),
    )?;
    let controller = ViewController::new(store, assistant, &app_settings.inventory);

    // 6. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, BotData::new(controller, app_settings)).await
}
