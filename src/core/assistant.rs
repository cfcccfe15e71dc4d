//! Remote assistant gateway.
//!
//! Two stateless request/response operations backed by the Gemini
//! `generateContent` REST endpoint: suggesting a category and description
//! for a product name, and answering a free-text question about the
//! inventory. Neither operation returns an error. Transport failures, bad
//! status codes and malformed model output are logged and replaced with
//! fixed placeholder values, so callers never deal with the remote
//! service's failure modes.

use crate::{
    config::settings::{AssistantSettings, InventorySettings},
    core::product::{DEFAULT_CATEGORY, Product},
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, warn};

/// Answer used when no API key is configured.
pub const MISSING_KEY_ANSWER: &str = "API Key is missing. Please check your configuration.";
/// Answer used when the analysis request fails.
pub const ANALYSIS_FAILED_ANSWER: &str =
    "Sorry, I encountered an error while analyzing the inventory.";
/// Answer used when the model replies with no text.
pub const EMPTY_ANSWER: &str = "I couldn't generate a response.";

/// Category used when a suggestion request fails.
pub const FAILED_SUGGESTION_CATEGORY: &str = "Uncategorized";
/// Description used when a suggestion request fails.
pub const FAILED_SUGGESTION_DESCRIPTION: &str = "Could not generate description.";

const SYSTEM_INSTRUCTION: &str =
    "You are a helpful inventory assistant. You analyze stock levels, value, and suggest actions.";

/// Category and description proposed for a product name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSuggestion {
    /// Proposed category
    pub category: String,
    /// Proposed short description
    pub description: String,
}

impl ProductSuggestion {
    /// Suggestion returned when the assistant is not configured.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            description: String::new(),
        }
    }

    /// Suggestion returned when the request failed.
    #[must_use]
    pub fn failed() -> Self {
        Self {
            category: FAILED_SUGGESTION_CATEGORY.to_string(),
            description: FAILED_SUGGESTION_DESCRIPTION.to_string(),
        }
    }
}

/// Minimal per-product projection sent with analysis questions.
#[derive(Debug, Serialize)]
pub struct ProductContext<'a> {
    name: &'a str,
    qty: u32,
    price: f64,
    cat: &'a str,
}

impl<'a> From<&'a Product> for ProductContext<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            name: &product.name,
            qty: product.quantity,
            price: product.price,
            cat: &product.category,
        }
    }
}

/// Internal failure modes; never leave this module.
#[derive(Debug, thiserror::Error)]
enum GatewayError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("response contained no text")]
    EmptyResponse,
    #[error("response was not the expected JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn user(text: String) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part { text: Some(text) }],
        }
    }

    fn instruction(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, or `None` when it has none.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// Client for the remote text-generation service.
#[derive(Debug, Clone)]
pub struct AssistantClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    api_base: String,
    currency_code: String,
    currency_symbol: String,
}

impl AssistantClient {
    /// Builds a client. With `api_key` absent both operations return
    /// placeholders without any network traffic.
    ///
    /// # Errors
    /// Returns `Error::Config` if the HTTP client cannot be constructed.
    pub fn new(
        settings: &AssistantSettings,
        inventory: &InventorySettings,
        api_key: Option<String>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| Error::Config {
            message: format!("Failed to build HTTP client: {e}"),
        })?;

        if api_key.is_none() {
            warn!("No assistant API key configured; assistant features will return placeholders");
        }

        Ok(Self {
            http,
            api_key,
            model: settings.model.clone(),
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            currency_code: inventory.currency_code.clone(),
            currency_symbol: inventory.currency_symbol.clone(),
        })
    }

    /// Whether an API key is available.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Model identifier used for requests.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Asks the model for a category and a short description for `name`.
    pub async fn suggest_details(&self, name: &str) -> ProductSuggestion {
        let Some(api_key) = self.api_key.as_deref() else {
            return ProductSuggestion::unconfigured();
        };

        let request = GenerateContentRequest {
            contents: vec![Content::user(suggestion_prompt(name))],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: serde_json::json!({
                    "type": "OBJECT",
                    "properties": {
                        "category": { "type": "STRING" },
                        "description": { "type": "STRING" }
                    },
                    "required": ["category", "description"]
                }),
            }),
        };

        self.generate(api_key, &request)
            .await
            .and_then(|text| parse_suggestion(&text))
            .unwrap_or_else(|e| {
                error!("Assistant suggestion failed for '{name}': {e}");
                ProductSuggestion::failed()
            })
    }

    /// Answers `query` using a compact projection of `products` as context.
    pub async fn analyze_inventory(&self, products: &[Product], query: &str) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return MISSING_KEY_ANSWER.to_string();
        };

        let prompt = match self.analysis_prompt(products, query) {
            Ok(prompt) => prompt,
            Err(e) => {
                error!("Failed to encode inventory context: {e}");
                return ANALYSIS_FAILED_ANSWER.to_string();
            }
        };

        let request = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            system_instruction: Some(Content::instruction(SYSTEM_INSTRUCTION)),
            generation_config: None,
        };

        match self.generate(api_key, &request).await {
            Ok(text) => text,
            Err(GatewayError::EmptyResponse) => EMPTY_ANSWER.to_string(),
            Err(e) => {
                error!("Assistant analysis failed: {e}");
                ANALYSIS_FAILED_ANSWER.to_string()
            }
        }
    }

    fn analysis_prompt(
        &self,
        products: &[Product],
        query: &str,
    ) -> std::result::Result<String, serde_json::Error> {
        let context: Vec<ProductContext<'_>> = products.iter().map(ProductContext::from).collect();
        let inventory_json = serde_json::to_string(&context)?;
        let code = &self.currency_code;
        let symbol = &self.currency_symbol;

        Ok(format!(
            "You are an intelligent inventory manager assistant.\n\
             Currency: {code}. Symbol: {symbol}.\n\
             Context: You are analyzing the user's LIVE inventory data.\n\n\
             Here is the current live inventory data in JSON format:\n\
             {inventory_json}\n\n\
             User Question: \"{query}\"\n\n\
             Answer the user's question based on the data provided.\n\
             If they ask for suggestions, analyze the stock levels and prices.\n\
             Keep the answer concise and helpful.\n\
             If the inventory is empty, tell them to add products first."
        ))
    }

    async fn generate(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> std::result::Result<String, GatewayError> {
        let url = format!("{}/models/{}:generateContent", self.api_base, self.model);
        debug!("POST {url}");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status { status, body });
        }

        let body: GenerateContentResponse = response.json().await?;
        body.text().ok_or(GatewayError::EmptyResponse)
    }
}

fn suggestion_prompt(name: &str) -> String {
    format!(
        "Generate a short description (max 15 words) and a general category for a product named \"{name}\".\n\
         Return JSON format only: {{ \"category\": \"string\", \"description\": \"string\" }}"
    )
}

/// Removes Markdown code fences the model sometimes wraps JSON in.
fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

fn parse_suggestion(text: &str) -> std::result::Result<ProductSuggestion, GatewayError> {
    Ok(serde_json::from_str(&strip_code_fences(text))?)
}
