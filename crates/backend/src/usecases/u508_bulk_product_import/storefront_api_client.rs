use async_trait::async_trait;
use contracts::usecases::u508_bulk_product_import::{
    BulkJob, BulkJobStatus, UserError, WebhookFormat, WebhookSubscription,
};
use serde::Deserialize;
use std::sync::Arc;

use super::capabilities::{BulkJobTrigger, UploadSlotRequester, WebhookRegistrar};
use super::slot::{SignedField, SlotRequest, UploadSlot};
use crate::shared::storefront::{AdminGraphqlClient, StorefrontError};

const STAGED_UPLOADS_MUTATION: &str = r#"
mutation stagedUploadsCreate($input: [StagedUploadInput!]!) {
  stagedUploadsCreate(input: $input) {
    stagedTargets {
      url
      resourceUrl
      parameters {
        name
        value
      }
    }
    userErrors {
      field
      message
    }
  }
}
"#;

const BULK_OPERATION_RUN_MUTATION: &str = r#"
mutation bulkOperationRunMutation($mutation: String!, $stagedUploadPath: String!) {
  bulkOperationRunMutation(mutation: $mutation, stagedUploadPath: $stagedUploadPath) {
    bulkOperation {
      id
      url
      status
    }
    userErrors {
      field
      message
    }
  }
}
"#;

const WEBHOOK_SUBSCRIPTION_CREATE: &str = r#"
mutation webhookSubscriptionCreate($topic: WebhookSubscriptionTopic!, $webhookSubscription: WebhookSubscriptionInput!) {
  webhookSubscriptionCreate(topic: $topic, webhookSubscription: $webhookSubscription) {
    userErrors {
      field
      message
    }
    webhookSubscription {
      id
    }
  }
}
"#;

/// Статус, который получает операция, если платформа ее не вернула
pub const MISSING_OPERATION_STATUS: &str = "NONE";

/// Реализация GraphQL-вызовов пайплайна поверх Admin API
pub struct StorefrontBulkApi {
    graphql: Arc<AdminGraphqlClient>,
}

impl StorefrontBulkApi {
    pub fn new(graphql: Arc<AdminGraphqlClient>) -> Self {
        Self { graphql }
    }
}

// ============================================================================
// Response structures
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StagedUploadsCreateData {
    staged_uploads_create: Option<StagedUploadsCreatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StagedUploadsCreatePayload {
    #[serde(default)]
    staged_targets: Option<Vec<StagedTarget>>,
    #[serde(default)]
    user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StagedTarget {
    url: Option<String>,
    resource_url: Option<String>,
    #[serde(default)]
    parameters: Vec<SignedField>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BulkOperationRunMutationData {
    bulk_operation_run_mutation: Option<BulkOperationRunMutationPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BulkOperationRunMutationPayload {
    bulk_operation: Option<BulkOperationNode>,
    #[serde(default)]
    user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
struct BulkOperationNode {
    id: Option<String>,
    url: Option<String>,
    status: BulkJobStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebhookSubscriptionCreateData {
    webhook_subscription_create: Option<WebhookSubscriptionCreatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebhookSubscriptionCreatePayload {
    #[serde(default)]
    user_errors: Vec<UserError>,
    webhook_subscription: Option<WebhookSubscriptionNode>,
}

#[derive(Debug, Deserialize)]
struct WebhookSubscriptionNode {
    id: Option<String>,
}

// ============================================================================
// Capabilities
// ============================================================================

#[async_trait]
impl UploadSlotRequester for StorefrontBulkApi {
    async fn request_upload_slot(&self, request: &SlotRequest) -> Result<UploadSlot, StorefrontError> {
        let data: StagedUploadsCreateData = self
            .graphql
            .execute(
                "stagedUploadsCreate",
                STAGED_UPLOADS_MUTATION,
                serde_json::json!({ "input": [request] }),
            )
            .await?;

        let payload = data
            .staged_uploads_create
            .ok_or_else(|| StorefrontError::MissingData("stagedUploadsCreate".into()))?;

        if !payload.user_errors.is_empty() {
            return Err(StorefrontError::UserErrors(payload.user_errors));
        }

        // Запрашивали один файл, значит интересует первая цель
        let target = payload
            .staged_targets
            .and_then(|targets| targets.into_iter().next())
            .ok_or_else(|| StorefrontError::MissingData("staged upload target".into()))?;

        let target_url = target
            .url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| StorefrontError::MissingData("staged upload target url".into()))?;

        Ok(UploadSlot {
            target_url,
            resource_url: target.resource_url,
            signed_fields: target.parameters,
        })
    }
}

#[async_trait]
impl BulkJobTrigger for StorefrontBulkApi {
    async fn run_bulk_mutation(
        &self,
        mutation_template: &str,
        staged_path: &str,
    ) -> Result<BulkJob, StorefrontError> {
        let data: BulkOperationRunMutationData = self
            .graphql
            .execute(
                "bulkOperationRunMutation",
                BULK_OPERATION_RUN_MUTATION,
                serde_json::json!({
                    "mutation": mutation_template,
                    "stagedUploadPath": staged_path,
                }),
            )
            .await?;

        let payload = data
            .bulk_operation_run_mutation
            .ok_or_else(|| StorefrontError::MissingData("bulkOperationRunMutation".into()))?;

        let job = match payload.bulk_operation {
            Some(op) => BulkJob {
                id: op.id,
                url: op.url,
                status: op.status,
                errors: payload.user_errors,
            },
            None => BulkJob {
                id: None,
                url: None,
                status: BulkJobStatus::Unknown(MISSING_OPERATION_STATUS.to_string()),
                errors: payload.user_errors,
            },
        };

        Ok(job)
    }
}

#[async_trait]
impl WebhookRegistrar for StorefrontBulkApi {
    async fn create_subscription(
        &self,
        topic: &str,
        callback_url: &str,
        format: WebhookFormat,
    ) -> Result<WebhookSubscription, StorefrontError> {
        let data: WebhookSubscriptionCreateData = self
            .graphql
            .execute(
                "webhookSubscriptionCreate",
                WEBHOOK_SUBSCRIPTION_CREATE,
                serde_json::json!({
                    "topic": topic,
                    "webhookSubscription": {
                        "format": format,
                        "callbackUrl": callback_url,
                    },
                }),
            )
            .await?;

        let payload = data
            .webhook_subscription_create
            .ok_or_else(|| StorefrontError::MissingData("webhookSubscriptionCreate".into()))?;

        if !payload.user_errors.is_empty() {
            return Err(StorefrontError::UserErrors(payload.user_errors));
        }

        Ok(WebhookSubscription {
            id: payload.webhook_subscription.and_then(|s| s.id),
            topic: topic.to_string(),
            callback_url: callback_url.to_string(),
            format,
        })
    }
}
