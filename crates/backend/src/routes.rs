use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers;
use crate::shared::storefront::products::CatalogSource;
use crate::usecases::u508_bulk_product_import::BulkImportExecutor;

/// Общие зависимости обработчиков
#[derive(Clone)]
pub struct AppState {
    pub executor: Arc<BulkImportExecutor>,
    pub catalog: Arc<dyn CatalogSource>,
}

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // Storefront catalog
        .route("/api/products", get(handlers::a007_storefront_product::list))
        // Carrier service callback
        .route("/api/shipping/rates", post(handlers::shipping_rate::rates))
        // UseCase u508: Bulk product import
        .route(
            "/api/u508/import/start",
            post(handlers::usecases::u508_start_import),
        )
        .route(
            "/api/u508/import/sync",
            post(handlers::usecases::u508_sync_catalog),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storefront::StorefrontError;
    use crate::usecases::u508_bulk_product_import::capabilities::{
        BulkJobTrigger, PayloadTransfer, UploadSlotRequester, WebhookRegistrar,
    };
    use crate::usecases::u508_bulk_product_import::executor::DEFAULT_MUTATION_TEMPLATE;
    use crate::usecases::u508_bulk_product_import::payload::MultipartPayload;
    use crate::usecases::u508_bulk_product_import::slot::{SignedField, SlotRequest, UploadSlot};
    use crate::usecases::u508_bulk_product_import::ImportSettings;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use contracts::domain::a007_storefront_product::ProductRecord;
    use contracts::usecases::u508_bulk_product_import::{
        BulkJob, BulkJobStatus, UserError, WebhookFormat, WebhookSubscription,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    /// Платформа, которая отвечает заранее заданным статусом операции
    struct FakeStorefront {
        status: BulkJobStatus,
        errors: Vec<UserError>,
    }

    #[async_trait]
    impl UploadSlotRequester for FakeStorefront {
        async fn request_upload_slot(&self, _: &SlotRequest) -> Result<UploadSlot, StorefrontError> {
            Ok(UploadSlot {
                target_url: "https://storage.example.com".to_string(),
                resource_url: None,
                signed_fields: vec![SignedField::new("key", "tmp/bulk/data.jsonl")],
            })
        }
    }

    #[async_trait]
    impl PayloadTransfer for FakeStorefront {
        async fn submit(&self, _: &str, _: MultipartPayload) -> Result<(), StorefrontError> {
            Ok(())
        }
    }

    #[async_trait]
    impl BulkJobTrigger for FakeStorefront {
        async fn run_bulk_mutation(&self, _: &str, _: &str) -> Result<BulkJob, StorefrontError> {
            Ok(BulkJob {
                id: Some("gid://shopify/BulkOperation/5".to_string()),
                url: None,
                status: self.status.clone(),
                errors: self.errors.clone(),
            })
        }
    }

    #[async_trait]
    impl WebhookRegistrar for FakeStorefront {
        async fn create_subscription(
            &self,
            topic: &str,
            callback_url: &str,
            format: WebhookFormat,
        ) -> Result<WebhookSubscription, StorefrontError> {
            Ok(WebhookSubscription {
                id: Some("gid://shopify/WebhookSubscription/1".to_string()),
                topic: topic.to_string(),
                callback_url: callback_url.to_string(),
                format,
            })
        }
    }

    #[async_trait]
    impl CatalogSource for FakeStorefront {
        async fn fetch_products(&self, take: u32) -> Result<Vec<ProductRecord>, StorefrontError> {
            Ok((0..take)
                .map(|i| ProductRecord {
                    id: Some(Value::from(i)),
                    title: Some(format!("P{i}")),
                    ..Default::default()
                })
                .collect())
        }
    }

    fn app(status: BulkJobStatus, errors: Vec<UserError>) -> Router {
        let fake = Arc::new(FakeStorefront { status, errors });
        let executor = BulkImportExecutor::new(
            fake.clone(),
            fake.clone(),
            fake.clone(),
            fake.clone(),
            ImportSettings {
                callback_url: "https://hooks.example.com/bulk".to_string(),
                default_filename: "data.jsonl".to_string(),
                mutation_template: DEFAULT_MUTATION_TEMPLATE.to_string(),
            },
        );
        configure_routes(AppState {
            executor: Arc::new(executor),
            catalog: fake,
        })
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_start_import_returns_subscription() {
        let (status, body) = post_json(
            app(BulkJobStatus::Created, vec![]),
            "/api/u508/import/start",
            json!({ "records": [{ "id": 1, "title": "T" }] }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], "subscribed");
        assert_eq!(body["staged_path"], "tmp/bulk/data.jsonl");
        assert_eq!(body["job"]["status"], "CREATED");
        assert_eq!(body["subscription"]["topic"], "BULK_OPERATIONS_FINISH");
        assert_eq!(body["subscription"]["format"], "JSON");
    }

    #[tokio::test]
    async fn test_rejected_job_returns_user_errors() {
        let (status, body) = post_json(
            app(BulkJobStatus::Failed, vec![UserError::new("input", "invalid")]),
            "/api/u508/import/start",
            json!({ "records": [{ "id": 1, "title": "T" }] }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "BUSINESS_VALIDATION_ERROR");
        assert_eq!(body["state"], "skipped");
        assert_eq!(body["user_errors"], json!([{ "field": ["input"], "message": "invalid" }]));
    }

    #[tokio::test]
    async fn test_empty_batch_is_bad_request() {
        let (status, body) = post_json(
            app(BulkJobStatus::Created, vec![]),
            "/api/u508/import/start",
            json!({ "records": [] }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "EMPTY_BATCH");
    }

    #[tokio::test]
    async fn test_sync_uses_catalog_records() {
        let (status, body) = post_json(
            app(BulkJobStatus::Created, vec![]),
            "/api/u508/import/sync",
            json!({ "take": 3, "callback_url": "https://hooks.example.com/sync" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["record_count"], 3);
        assert_eq!(body["subscription"]["callback_url"], "https://hooks.example.com/sync");
    }

    #[tokio::test]
    async fn test_shipping_rates_are_fixed() {
        let (status, body) = post_json(
            app(BulkJobStatus::Created, vec![]),
            "/api/shipping/rates",
            json!({ "rate": { "destination": { "country": "VN" }, "items": [] } }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let rates = body["rates"].as_array().unwrap();
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0]["service_code"], "STANDARD");
        assert_eq!(rates[0]["total_price"], 10000);
        assert_eq!(rates[1]["service_code"], "EXPRESS");
        assert_eq!(rates[1]["total_price"], 20000);
    }

    #[tokio::test]
    async fn test_products_listing() {
        let response = app(BulkJobStatus::Created, vec![])
            .oneshot(
                Request::builder()
                    .uri("/api/products?take=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["take"], 2);
        assert_eq!(body["products"][1]["title"], "P1");
    }

    #[tokio::test]
    async fn test_products_listing_reports_clamped_take() {
        let response = app(BulkJobStatus::Created, vec![])
            .oneshot(
                Request::builder()
                    .uri("/api/products?take=1000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["take"], 250);
        assert_eq!(body["products"].as_array().unwrap().len(), 250);
    }
}
