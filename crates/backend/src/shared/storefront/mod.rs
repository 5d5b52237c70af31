pub mod error;
pub mod products;

pub use error::StorefrontError;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::shared::config::StorefrontConfig;
use error::preview;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// HTTP-клиент для Admin GraphQL API витрины
pub struct AdminGraphqlClient {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GraphqlEnvelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphqlErrorMessage>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorMessage {
    message: String,
}

impl AdminGraphqlClient {
    pub fn new(config: &StorefrontConfig) -> Result<Self, StorefrontError> {
        Self::with_endpoint(
            config.graphql_endpoint(),
            config.access_token.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn with_endpoint(
        endpoint: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, StorefrontError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            access_token: access_token.into(),
        })
    }

    /// Выполнить GraphQL-операцию и вернуть `data`
    ///
    /// Транспортные ошибки, не-2xx статус и непустой `errors` верхнего уровня
    /// возвращаются как `StorefrontError`. `userErrors` внутри `data` разбирает
    /// вызывающий код.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: Value,
    ) -> Result<T, StorefrontError> {
        tracing::debug!("Storefront GraphQL POST {} ({})", self.endpoint, operation);

        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&serde_json::json!({
                "query": query,
                "variables": variables,
            }))
            .send()
            .await?;

        let status = response.status();
        tracing::info!("Storefront GraphQL {} -> {}", operation, status.as_u16());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Storefront GraphQL {} failed: {}", operation, preview(&body));
            return Err(StorefrontError::Status {
                status: status.as_u16(),
                body: preview(&body),
            });
        }

        let body = response.text().await?;
        let envelope: GraphqlEnvelope<T> = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse {} response: {}", operation, e);
            StorefrontError::Decode(format!("{}. Response: {}", e, preview(&body)))
        })?;

        if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
            return Err(StorefrontError::Graphql(
                errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        envelope
            .data
            .ok_or_else(|| StorefrontError::MissingData(format!("data in {} response", operation)))
    }
}
