use async_trait::async_trait;
use core_config::{env_or_default, env_required, ConfigError, FromEnv};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SemanticError, SemanticResult};
use crate::models::{Embedding, InputKind};
use crate::provider::Embedder;

/// Model used for all embeddings. 384 dimensions, multilingual.
pub const EMBEDDING_MODEL: &str = "embed-multilingual-light-v3.0";

const DEFAULT_BASE_URL: &str = "https://api.cohere.com";

/// Cohere API configuration.
#[derive(Debug, Clone)]
pub struct CohereConfig {
    pub api_key: String,
    pub base_url: String,
}

impl CohereConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Environment variables:
/// - `COHERE_API_KEY` (required)
/// - `COHERE_BASE_URL` (optional, default: `https://api.cohere.com`)
impl FromEnv for CohereConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = env_required("COHERE_API_KEY")?;
        let base_url = env_or_default("COHERE_BASE_URL", DEFAULT_BASE_URL);
        Ok(Self { api_key, base_url })
    }
}

/// Cohere v2 embed client.
///
/// Holds one reusable [`reqwest::Client`]; clone the wrapper, not the
/// connection pool.
pub struct CohereClient {
    client: Client,
    config: CohereConfig,
}

impl CohereClient {
    pub fn new(config: CohereConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

fn input_type(kind: InputKind) -> &'static str {
    match kind {
        InputKind::Document => "search_document",
        InputKind::Query => "search_query",
    }
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    texts: Vec<&'a str>,
    input_type: &'a str,
    embedding_types: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: EmbedResponseVectors,
}

#[derive(Debug, Deserialize)]
struct EmbedResponseVectors {
    #[serde(default)]
    float: Vec<Vec<f32>>,
}

#[async_trait]
impl Embedder for CohereClient {
    async fn embed(&self, text: &str, kind: InputKind) -> SemanticResult<Embedding> {
        debug!(input_type = input_type(kind), "Requesting embedding");

        let request = EmbedRequest {
            model: EMBEDDING_MODEL,
            texts: vec![text],
            input_type: input_type(kind),
            embedding_types: vec!["float"],
        };

        let response = self
            .client
            .post(format!("{}/v2/embed", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| SemanticError::ProviderUnavailable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let body = response.text().await.unwrap_or_default();
            return Err(SemanticError::RateLimited(body));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SemanticError::ProviderUnavailable(format!(
                "Cohere API error ({}): {}",
                status, body
            )));
        }

        let embed_response: EmbedResponse = response
            .json()
            .await
            .map_err(|e| SemanticError::InvalidResponse(e.to_string()))?;

        let values = embed_response
            .embeddings
            .float
            .into_iter()
            .next()
            .ok_or_else(|| {
                SemanticError::InvalidResponse("no float embeddings returned".to_string())
            })?;

        Embedding::new(values)
    }
}
