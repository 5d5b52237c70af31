//! Внешние вызовы, на которые опирается пайплайн.
//!
//! Каждый трейт описывает ровно один удаленный вызов. Исполнитель работает
//! только через них, поэтому в тестах их подменяют заглушками.

use async_trait::async_trait;
use contracts::usecases::u508_bulk_product_import::{BulkJob, WebhookFormat, WebhookSubscription};

use super::payload::MultipartPayload;
use super::slot::{SlotRequest, UploadSlot};
use crate::shared::storefront::StorefrontError;

/// Запрос одноразового слота для загрузки файла (stagedUploadsCreate)
#[async_trait]
pub trait UploadSlotRequester: Send + Sync {
    async fn request_upload_slot(&self, request: &SlotRequest) -> Result<UploadSlot, StorefrontError>;
}

/// Отправка multipart-формы на подписанный адрес
#[async_trait]
pub trait PayloadTransfer: Send + Sync {
    async fn submit(&self, url: &str, payload: MultipartPayload) -> Result<(), StorefrontError>;
}

/// Запуск bulk-мутации по загруженному файлу (bulkOperationRunMutation)
#[async_trait]
pub trait BulkJobTrigger: Send + Sync {
    async fn run_bulk_mutation(
        &self,
        mutation_template: &str,
        staged_path: &str,
    ) -> Result<BulkJob, StorefrontError>;
}

/// Регистрация вебхука (webhookSubscriptionCreate)
#[async_trait]
pub trait WebhookRegistrar: Send + Sync {
    async fn create_subscription(
        &self,
        topic: &str,
        callback_url: &str,
        format: WebhookFormat,
    ) -> Result<WebhookSubscription, StorefrontError>;
}
