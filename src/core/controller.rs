//! View controller - owns all session state and dispatches user actions.
//!
//! The controller holds the product store, the assistant client, the
//! selected screen, the search query, the add/edit form buffer, the chat
//! history and the lifecycle of every asynchronous request. Front ends only
//! talk to the controller; nothing else keeps a copy of the products.
//!
//! Remote calls are split into `begin_*` and `finish_*` halves so a front end
//! can release its lock on the controller while a request is outstanding.
//! The pending state lives here, so a second request is refused even if the
//! front end forgets to disable its trigger.

use crate::{
    config::settings::InventorySettings,
    core::{
        assistant::{AssistantClient, ProductSuggestion},
        backup,
        chat::{ChatMessage, RequestState},
        product::{self, Product, ProductInput, ProductPatch},
        report::{self, ExportedFile},
        search,
        stats::InventoryStats,
        store::{Confirmation, ProductStore},
    },
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use std::{collections::HashSet, fmt};
use tracing::{debug, info};

/// Number of products shown in the dashboard's "recent" table.
pub const RECENT_PRODUCTS: usize = 5;

/// Category suggestions offered by the product form.
pub const CATEGORY_OPTIONS: [&str; 4] = ["Electronics", "Furniture", "Clothing", "Office Supplies"];

/// The three screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppView {
    /// Stats cards, data management and recent products
    #[default]
    Dashboard,
    /// Searchable product table
    Inventory,
    /// Chat with the remote assistant
    Assistant,
}

impl AppView {
    /// Heading shown at the top of the screen.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Overview",
            Self::Inventory => "Product Management",
            Self::Assistant => "AI Insights",
        }
    }
}

impl fmt::Display for AppView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Whether the form creates a product or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    /// New product
    Add,
    /// Existing product with this id
    Edit {
        /// Id of the product being edited
        id: String,
    },
}

/// Identifies one opening of the product form. Reopening the form, for the
/// same product or another, issues a new token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormToken(u64);

/// Transient buffer behind the add/edit dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    token: FormToken,
    /// Add or edit
    pub mode: FormMode,
    /// Product name
    pub name: String,
    /// Category text
    pub category: String,
    /// Units in stock
    pub quantity: u32,
    /// Unit price
    pub price: f64,
    /// Description text
    pub description: String,
}

impl ProductForm {
    fn blank(token: FormToken) -> Self {
        Self {
            token,
            mode: FormMode::Add,
            name: String::new(),
            category: String::new(),
            quantity: 0,
            price: 0.0,
            description: String::new(),
        }
    }

    fn for_product(token: FormToken, product: &Product) -> Self {
        Self {
            token,
            mode: FormMode::Edit {
                id: product.id.clone(),
            },
            name: product.name.clone(),
            category: product.category.clone(),
            quantity: product.quantity,
            price: product.price,
            description: product.description.clone(),
        }
    }

    /// Token issued when this form was opened.
    #[must_use]
    pub const fn token(&self) -> FormToken {
        self.token
    }

    /// Dialog heading.
    #[must_use]
    pub const fn heading(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Add New Product",
            FormMode::Edit { .. } => "Edit Product",
        }
    }
}

/// An auto fill in flight: the form it belongs to and the name to look up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutofillRequest {
    /// Form the suggestion must be written into
    pub token: FormToken,
    /// Product name sent to the assistant
    pub name: String,
}

/// Snapshot handed to the assistant for one chat question.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Products at the time the question was asked
    pub products: Vec<Product>,
    /// The question
    pub query: String,
}

/// Session state for one operator.
#[derive(Debug)]
pub struct ViewController {
    store: ProductStore,
    assistant: AssistantClient,
    currency_code: String,
    currency_symbol: String,
    view: AppView,
    search: String,
    form: Option<ProductForm>,
    next_form_token: u64,
    autofill_state: RequestState,
    chat: Vec<ChatMessage>,
    chat_state: RequestState,
    pending_deletes: HashSet<String>,
}

impl ViewController {
    /// Creates a controller around an already loaded store.
    #[must_use]
    pub fn new(store: ProductStore, assistant: AssistantClient, inventory: &InventorySettings) -> Self {
        Self {
            store,
            assistant,
            currency_code: inventory.currency_code.clone(),
            currency_symbol: inventory.currency_symbol.clone(),
            view: AppView::default(),
            search: String::new(),
            form: None,
            next_form_token: 0,
            autofill_state: RequestState::Idle,
            chat: Vec::new(),
            chat_state: RequestState::Idle,
            pending_deletes: HashSet::new(),
        }
    }

    // ---- navigation -------------------------------------------------------

    /// Currently selected screen.
    #[must_use]
    pub const fn view(&self) -> AppView {
        self.view
    }

    /// Switches to another screen.
    pub fn select_view(&mut self, view: AppView) {
        debug!("Switching view to {view:?}");
        self.view = view;
    }

    // ---- derived data -----------------------------------------------------

    /// The product store.
    #[must_use]
    pub const fn store(&self) -> &ProductStore {
        &self.store
    }

    /// All products in insertion order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        self.store.products()
    }

    /// A handle to the assistant, for calls made without holding the controller.
    #[must_use]
    pub const fn assistant(&self) -> &AssistantClient {
        &self.assistant
    }

    /// Currency symbol for on-screen prices.
    #[must_use]
    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// Current search query.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Replaces the search query.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Products matching the current search query.
    #[must_use]
    pub fn filtered_products(&self) -> Vec<&Product> {
        search::filter_products(self.store.products(), &self.search)
    }

    /// Dashboard statistics over the whole inventory.
    #[must_use]
    pub fn stats(&self) -> InventoryStats {
        InventoryStats::from_products(self.store.products())
    }

    /// The first few products, shown on the dashboard.
    #[must_use]
    pub fn recent_products(&self) -> &[Product] {
        let products = self.store.products();
        &products[..products.len().min(RECENT_PRODUCTS)]
    }

    // ---- product form -----------------------------------------------------

    /// The open form, if any.
    #[must_use]
    pub const fn form(&self) -> Option<&ProductForm> {
        self.form.as_ref()
    }

    /// Mutable access to the open form.
    ///
    /// # Errors
    /// Returns `Error::NoOpenForm` when no form is open.
    pub fn form_mut(&mut self) -> Result<&mut ProductForm> {
        self.form.as_mut().ok_or(Error::NoOpenForm)
    }

    fn issue_form_token(&mut self) -> FormToken {
        self.next_form_token += 1;
        FormToken(self.next_form_token)
    }

    /// Opens an empty form for a new product, replacing any open form.
    pub fn open_add_form(&mut self) -> FormToken {
        let token = self.issue_form_token();
        self.form = Some(ProductForm::blank(token));
        self.autofill_state = RequestState::Idle;
        token
    }

    /// Opens the form pre-filled with an existing product, replacing any open form.
    ///
    /// # Errors
    /// Returns `Error::ProductNotFound` for an unknown id.
    pub fn open_edit_form(&mut self, id: &str) -> Result<FormToken> {
        let product = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| Error::ProductNotFound {
                name: id.to_string(),
            })?;
        let token = self.issue_form_token();
        self.form = Some(ProductForm::for_product(token, &product));
        self.autofill_state = RequestState::Idle;
        Ok(token)
    }

    /// Discards the form without saving.
    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Saves the open form as a new product or as an edit, then closes it.
    /// The form stays open when saving fails.
    ///
    /// # Errors
    /// Returns `Error::NoOpenForm`, a validation error, or a database error.
    pub async fn save_form(&mut self) -> Result<Product> {
        let form = self.form.clone().ok_or(Error::NoOpenForm)?;
        product::validate_name(&form.name)?;

        let saved = match form.mode {
            FormMode::Add => {
                self.store
                    .add(ProductInput {
                        name: form.name,
                        category: Some(form.category),
                        quantity: form.quantity,
                        price: form.price,
                        description: Some(form.description),
                    })
                    .await?
            }
            FormMode::Edit { id } => {
                self.store
                    .update(
                        &id,
                        ProductPatch {
                            name: Some(form.name),
                            category: Some(form.category),
                            quantity: Some(form.quantity),
                            price: Some(form.price),
                            description: Some(form.description),
                        },
                    )
                    .await?
            }
        };

        self.close_form();
        Ok(saved)
    }

    // ---- auto fill --------------------------------------------------------

    /// Lifecycle of the auto-fill request.
    #[must_use]
    pub const fn autofill_state(&self) -> RequestState {
        self.autofill_state
    }

    /// Marks an auto-fill request for the open form as pending.
    ///
    /// # Errors
    /// Returns `Error::NoOpenForm`, `Error::Validation` for a blank name, or
    /// `Error::RequestPending` while another auto fill is outstanding.
    pub fn begin_autofill(&mut self) -> Result<AutofillRequest> {
        if self.autofill_state.is_pending() {
            return Err(Error::RequestPending {
                operation: "autofill",
            });
        }
        let form = self.form.as_ref().ok_or(Error::NoOpenForm)?;
        let request = AutofillRequest {
            token: form.token,
            name: product::validate_name(&form.name)?,
        };
        self.autofill_state = RequestState::Pending;
        Ok(request)
    }

    /// Writes a suggestion into the form identified by `token`.
    ///
    /// # Errors
    /// Returns `Error::StaleForm` when that form was closed or replaced while
    /// the request was outstanding. The suggestion is dropped and whatever
    /// form is open now is left alone.
    pub fn finish_autofill(
        &mut self,
        token: FormToken,
        suggestion: ProductSuggestion,
    ) -> Result<()> {
        let Some(form) = self.form.as_mut().filter(|form| form.token == token) else {
            debug!("Dropping auto fill for a form that is no longer open");
            if self.autofill_state.is_pending() {
                self.autofill_state = RequestState::Failed;
            }
            return Err(Error::StaleForm);
        };
        form.category = suggestion.category;
        form.description = suggestion.description;
        self.autofill_state = RequestState::Succeeded;
        Ok(())
    }

    /// Runs a complete auto fill for the open form.
    ///
    /// # Errors
    /// See [`Self::begin_autofill`].
    pub async fn autofill(&mut self) -> Result<()> {
        let request = self.begin_autofill()?;
        let suggestion = self.assistant.suggest_details(&request.name).await;
        self.finish_autofill(request.token, suggestion)
    }

    // ---- assistant chat ---------------------------------------------------

    /// Conversation so far, oldest first.
    #[must_use]
    pub fn chat_history(&self) -> &[ChatMessage] {
        &self.chat
    }

    /// Lifecycle of the chat request.
    #[must_use]
    pub const fn chat_state(&self) -> RequestState {
        self.chat_state
    }

    /// Appends the user's question and marks the chat as pending.
    ///
    /// # Errors
    /// Returns `Error::Validation` for a blank question or
    /// `Error::RequestPending` while an answer is outstanding.
    pub fn begin_chat(&mut self, text: &str) -> Result<ChatRequest> {
        if text.trim().is_empty() {
            return Err(Error::Validation {
                message: "Question cannot be empty".to_string(),
            });
        }
        if self.chat_state.is_pending() {
            return Err(Error::RequestPending { operation: "chat" });
        }

        self.chat.push(ChatMessage::user(text));
        self.chat_state = RequestState::Pending;
        Ok(ChatRequest {
            products: self.store.products().to_vec(),
            query: text.to_string(),
        })
    }

    /// Appends the model's answer and clears the pending state.
    pub fn finish_chat(&mut self, answer: String) -> &ChatMessage {
        self.chat_state = RequestState::Succeeded;
        self.chat.push(ChatMessage::model(answer));
        &self.chat[self.chat.len() - 1]
    }

    /// Asks the assistant a question and records both sides of the exchange.
    ///
    /// # Errors
    /// See [`Self::begin_chat`].
    pub async fn ask(&mut self, text: &str) -> Result<String> {
        let request = self.begin_chat(text)?;
        let answer = self
            .assistant
            .analyze_inventory(&request.products, &request.query)
            .await;
        Ok(self.finish_chat(answer).text.clone())
    }

    // ---- delete -----------------------------------------------------------

    /// Starts a delete that still needs the user's confirmation.
    ///
    /// # Errors
    /// Returns `Error::ProductNotFound` for an unknown id.
    pub fn request_delete(&mut self, id: &str) -> Result<Product> {
        let product = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| Error::ProductNotFound {
                name: id.to_string(),
            })?;
        self.pending_deletes.insert(product.id.clone());
        Ok(product)
    }

    /// Completes the pending delete of the product with `id`. Declining, or
    /// having no delete pending for that product, is a no-op.
    ///
    /// # Errors
    /// Returns a database error, or `Error::ProductNotFound` if the product
    /// vanished in the meantime.
    pub async fn resolve_delete(
        &mut self,
        id: &str,
        confirmation: Confirmation,
    ) -> Result<Option<Product>> {
        if !self.pending_deletes.remove(id) {
            return Ok(None);
        }
        let removed = self.store.remove(id, confirmation).await?;
        let editing_removed = match (&removed, &self.form) {
            (Some(product), Some(form)) => form.mode == FormMode::Edit { id: product.id.clone() },
            _ => false,
        };
        if editing_removed {
            self.close_form();
        }
        Ok(removed)
    }

    // ---- files --------------------------------------------------------------

    /// PDF report of the currently filtered products.
    ///
    /// # Errors
    /// Returns `Error::Report` if rendering fails.
    pub fn export_report(&self, now: DateTime<Utc>) -> Result<ExportedFile> {
        let file = report::export_pdf(
            &self.filtered_products(),
            &self.stats(),
            now,
            &self.currency_code,
        )?;
        info!("Exported report {}", file.filename);
        Ok(file)
    }

    /// JSON backup of the full, unfiltered collection.
    ///
    /// # Errors
    /// Returns a serialization error.
    pub fn backup(&self, now: DateTime<Utc>) -> Result<ExportedFile> {
        backup::export_backup(self.store.products(), now)
    }

    /// Replaces the collection with the contents of a backup file.
    ///
    /// # Errors
    /// Returns `Error::Restore` for a rejected file; the collection is unchanged.
    pub async fn restore(&mut self, contents: &[u8]) -> Result<usize> {
        let count = backup::restore(&mut self.store, contents).await?;
        self.close_form();
        self.pending_deletes.clear();
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{
        core::{assistant::MISSING_KEY_ANSWER, chat::ChatRole},
        errors::RestoreError,
        test_utils::*,
    };

    #[tokio::test]
    async fn test_starts_on_dashboard_with_seed() -> Result<()> {
        let controller = setup_controller().await?;
        assert_eq!(controller.view(), AppView::Dashboard);
        assert_eq!(controller.products().len(), 3);
        assert_eq!(controller.recent_products().len(), 3);
        Ok(())
    }

    #[test]
    fn test_view_titles() {
        assert_eq!(AppView::Dashboard.title(), "Overview");
        assert_eq!(AppView::Inventory.title(), "Product Management");
        assert_eq!(AppView::Assistant.to_string(), "AI Insights");
    }

    #[tokio::test]
    async fn test_select_view_and_search() -> Result<()> {
        let mut controller = setup_controller().await?;
        controller.select_view(AppView::Inventory);
        assert_eq!(controller.view(), AppView::Inventory);

        controller.set_search("ELECTRONICS");
        assert_eq!(controller.filtered_products().len(), 2);

        controller.set_search("");
        assert_eq!(controller.filtered_products().len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_widget_through_form() -> Result<()> {
        let mut controller = setup_controller().await?;
        let before = controller.stats();

        controller.open_add_form();
        assert_eq!(controller.form().unwrap().heading(), "Add New Product");
        {
            let form = controller.form_mut()?;
            form.name = "Widget".to_string();
            form.price = 100.0;
            form.quantity = 3;
        }
        let widget = controller.save_form().await?;

        assert!(controller.form().is_none());
        assert_eq!(widget.category, "General");
        let after = controller.stats();
        assert_eq!(after.total_value - before.total_value, 300.0);
        assert_eq!(after.total_products - before.total_products, 3);
        assert_eq!(after.low_stock_items, before.low_stock_items + 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_edit_form_prefills_and_updates() -> Result<()> {
        let mut controller = setup_controller().await?;
        controller.open_edit_form("3")?;
        assert_eq!(controller.form().unwrap().heading(), "Edit Product");
        assert_eq!(controller.form().unwrap().name, "Office Chair");

        controller.form_mut()?.quantity = 10;
        let saved = controller.save_form().await?;

        assert_eq!(saved.id, "3");
        assert_eq!(saved.quantity, 10);
        assert_eq!(controller.stats().low_stock_items, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_save_form_errors() -> Result<()> {
        let mut controller = setup_controller().await?;
        assert!(matches!(controller.save_form().await, Err(Error::NoOpenForm)));

        controller.open_add_form();
        assert!(matches!(
            controller.save_form().await,
            Err(Error::Validation { .. })
        ));
        assert!(controller.form().is_some());

        assert!(matches!(
            controller.open_edit_form("nope"),
            Err(Error::ProductNotFound { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_autofill_without_key_fills_general() -> Result<()> {
        let mut controller = setup_controller().await?;
        controller.open_add_form();
        assert!(matches!(controller.autofill().await, Err(Error::Validation { .. })));

        controller.form_mut()?.name = "Desk Lamp".to_string();
        controller.autofill().await?;

        let form = controller.form().unwrap();
        assert_eq!(form.category, "General");
        assert_eq!(form.description, "");
        assert_eq!(controller.autofill_state(), RequestState::Succeeded);
        Ok(())
    }

    #[tokio::test]
    async fn test_autofill_lifecycle() -> Result<()> {
        let mut controller = setup_controller().await?;
        let token = controller.open_add_form();
        controller.form_mut()?.name = "Desk Lamp".to_string();

        let request = controller.begin_autofill()?;
        assert_eq!(request.name, "Desk Lamp");
        assert_eq!(request.token, token);
        assert!(matches!(
            controller.begin_autofill(),
            Err(Error::RequestPending { operation: "autofill" })
        ));

        controller.close_form();
        let late = controller.finish_autofill(request.token, ProductSuggestion::failed());
        assert!(matches!(late, Err(Error::StaleForm)));
        assert_eq!(controller.autofill_state(), RequestState::Failed);
        Ok(())
    }

    #[tokio::test]
    async fn test_late_autofill_leaves_replacement_form_alone() -> Result<()> {
        let mut controller = setup_controller().await?;
        controller.open_add_form();
        controller.form_mut()?.name = "Widget".to_string();
        let request = controller.begin_autofill()?;

        // Another edit opens while the suggestion is outstanding
        let edit_token = controller.open_edit_form("3")?;
        assert_ne!(edit_token, request.token);

        let suggestion = ProductSuggestion {
            category: "Gadgets".to_string(),
            description: "A widget".to_string(),
        };
        let late = controller.finish_autofill(request.token, suggestion);
        assert!(matches!(late, Err(Error::StaleForm)));

        let form = controller.form().unwrap();
        assert_eq!(form.token(), edit_token);
        assert_eq!(form.name, "Office Chair");
        assert_eq!(form.category, "Furniture");
        assert_eq!(controller.store().get("3").unwrap().category, "Furniture");

        let saved = controller.save_form().await?;
        assert_eq!(saved.id, "3");
        assert_eq!(saved.category, "Furniture");
        assert!(controller.products().iter().all(|p| p.name != "Widget"));
        Ok(())
    }

    #[tokio::test]
    async fn test_reopening_form_issues_new_token() -> Result<()> {
        let mut controller = setup_controller().await?;
        let first = controller.open_edit_form("1")?;
        let second = controller.open_edit_form("1")?;
        assert_ne!(first, second);

        controller.form_mut()?.name = "Wireless Mouse".to_string();
        let request = controller.begin_autofill()?;
        assert_eq!(request.token, second);
        controller.finish_autofill(second, ProductSuggestion::failed())?;
        assert_eq!(controller.autofill_state(), RequestState::Succeeded);
        Ok(())
    }

    #[tokio::test]
    async fn test_chat_order_and_missing_key() -> Result<()> {
        let mut controller = setup_controller().await?;
        let answer = controller.ask("Which items are low?").await?;
        assert_eq!(answer, MISSING_KEY_ANSWER);

        let history = controller.chat_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, ChatRole::User);
        assert_eq!(history[0].text, "Which items are low?");
        assert_eq!(history[1].role, ChatRole::Model);
        assert_eq!(controller.chat_state(), RequestState::Succeeded);
        Ok(())
    }

    #[tokio::test]
    async fn test_chat_rejects_blank_and_concurrent_questions() -> Result<()> {
        let mut controller = setup_controller().await?;
        assert!(matches!(controller.begin_chat("   "), Err(Error::Validation { .. })));
        assert!(controller.chat_history().is_empty());

        let request = controller.begin_chat("First?")?;
        assert_eq!(request.products.len(), 3);
        assert!(matches!(
            controller.begin_chat("Second?"),
            Err(Error::RequestPending { operation: "chat" })
        ));

        controller.finish_chat("Answer".to_string());
        assert!(controller.begin_chat("Second?").is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() -> Result<()> {
        let mut controller = setup_controller().await?;

        let chair = controller.request_delete("3")?;
        assert_eq!(chair.name, "Office Chair");
        assert!(controller.resolve_delete("3", Confirmation::Declined).await?.is_none());
        assert_eq!(controller.products().len(), 3);

        controller.request_delete("3")?;
        let removed = controller.resolve_delete("3", Confirmation::Confirmed).await?;
        assert_eq!(removed.unwrap().id, "3");
        assert_eq!(controller.products().len(), 2);

        // Nothing pending any more
        assert!(controller.resolve_delete("3", Confirmation::Confirmed).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_overlapping_deletes_resolve_their_own_product() -> Result<()> {
        let mut controller = setup_controller().await?;
        controller.request_delete("1")?;
        controller.request_delete("3")?;

        let removed = controller.resolve_delete("1", Confirmation::Confirmed).await?;
        assert_eq!(removed.unwrap().name, "Wireless Mouse");
        assert!(controller.store().get("1").is_none());
        assert!(controller.store().get("3").is_some());

        assert!(controller.resolve_delete("3", Confirmation::Declined).await?.is_none());
        assert!(controller.store().get("3").is_some());
        assert_eq!(controller.products().len(), 2);

        // Unrequested product is never removed
        assert!(controller.resolve_delete("2", Confirmation::Confirmed).await?.is_none());
        assert!(controller.store().get("2").is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_backup_restore_and_rejection() -> Result<()> {
        let mut controller = setup_controller().await?;
        let file = controller.backup(Utc::now())?;
        assert!(file.filename.starts_with("smart_inventory_backup_"));

        controller.request_delete("1")?;
        controller.resolve_delete("1", Confirmation::Confirmed).await?;
        assert_eq!(controller.products().len(), 2);

        assert_eq!(controller.restore(&file.bytes).await?, 3);
        assert_eq!(controller.products().len(), 3);

        let rejected = controller.restore(b"\"just a string\"").await;
        assert!(matches!(
            rejected,
            Err(Error::Restore(RestoreError::NotASequence))
        ));
        assert_eq!(controller.products().len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_export_report_of_filtered_products() -> Result<()> {
        let mut controller = setup_controller().await?;
        controller.set_search("chair");
        let file = controller.export_report(Utc::now())?;
        assert!(file.filename.starts_with("inventory_report_"));
        assert!(file.filename.ends_with(".pdf"));
        assert!(file.bytes.starts_with(b"%PDF"));
        Ok(())
    }
}
