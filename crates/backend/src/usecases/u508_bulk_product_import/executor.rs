use chrono::Utc;
use contracts::domain::a007_storefront_product::ProductRecord;
use contracts::usecases::u508_bulk_product_import::{
    BulkJob, BulkJobStatus, ImportErrorResponse, ImportRequest, ImportResponse, RunState,
    WebhookFormat, WebhookSubscription,
};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use super::capabilities::{BulkJobTrigger, PayloadTransfer, UploadSlotRequester, WebhookRegistrar};
use super::error::ImportError;
use super::payload::{to_ndjson, MultipartPayload};
use super::slot::{SlotRequest, UploadSlot};
use super::staged_upload_transport::StagedUploadTransport;
use super::storefront_api_client::StorefrontBulkApi;
use crate::shared::config::Config;
use crate::shared::storefront::{AdminGraphqlClient, StorefrontError};

/// Топик вебхука о завершении bulk-операции
pub const BULK_OPERATIONS_FINISH_TOPIC: &str = "BULK_OPERATIONS_FINISH";

/// Мутация, которую платформа применяет к каждой строке JSONL
pub const DEFAULT_MUTATION_TEMPLATE: &str = "mutation call($input: ProductInput!) { productCreate(input: $input) { product {id title variants(first: 10) {edges {node {id title inventoryQuantity }}}} userErrors { message field } } }";

/// Настройки импорта из конфигурации
#[derive(Debug, Clone)]
pub struct ImportSettings {
    pub callback_url: String,
    pub default_filename: String,
    pub mutation_template: String,
}

impl ImportSettings {
    pub fn from_config(config: &Config) -> Self {
        let bulk = &config.bulk_import;
        Self {
            callback_url: bulk.callback_url.clone(),
            default_filename: bulk.default_filename.clone(),
            mutation_template: bulk
                .mutation_template
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MUTATION_TEMPLATE.to_string()),
        }
    }
}

/// Неуспешный прогон: ошибка шага и то, что успели получить от платформы
#[derive(Debug)]
pub struct ImportFailure {
    pub run_id: String,
    pub error: ImportError,
    pub job: Option<BulkJob>,
}

impl ImportFailure {
    pub fn to_response(&self) -> ImportErrorResponse {
        ImportErrorResponse {
            run_id: self.run_id.clone(),
            state: self.error.failed_state(),
            code: self.error.code().to_string(),
            message: self.error.to_string(),
            user_errors: self.error.user_errors(),
            job: self.job.clone(),
        }
    }
}

impl std::fmt::Display for ImportFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "run {}: {}", self.run_id, self.error)
    }
}

/// Текущее состояние одного прогона
struct RunTracker {
    run_id: String,
    state: RunState,
}

impl RunTracker {
    fn new(run_id: String) -> Self {
        Self {
            run_id,
            state: RunState::Init,
        }
    }

    /// Перейти в следующее состояние; назад и по кругу переходов нет
    fn advance(&mut self, next: RunState) {
        debug_assert!(
            is_forward_transition(self.state, next),
            "invalid transition {:?} -> {:?}",
            self.state,
            next
        );
        tracing::info!("Bulk import {}: {:?} -> {:?}", self.run_id, self.state, next);
        self.state = next;
    }
}

fn is_forward_transition(from: RunState, to: RunState) -> bool {
    use RunState::*;
    if from.is_terminal() {
        return false;
    }
    matches!(
        (from, to),
        (Init, SlotRequested)
            | (Init, SlotRequestFailed)
            | (SlotRequested, PayloadSent)
            | (SlotRequested, PayloadFailed)
            | (PayloadSent, JobTriggered)
            | (PayloadSent, TriggerFailed)
            | (JobTriggered, Subscribed)
            | (JobTriggered, Skipped)
            | (JobTriggered, SubscribeFailed)
    )
}

/// Executor для UseCase bulk-импорта товаров
///
/// Шаги выполняются строго по очереди, без повторов. Разные прогоны
/// ничего не делят между собой и друг друга не блокируют.
pub struct BulkImportExecutor {
    slot_requester: Arc<dyn UploadSlotRequester>,
    transfer: Arc<dyn PayloadTransfer>,
    trigger: Arc<dyn BulkJobTrigger>,
    webhooks: Arc<dyn WebhookRegistrar>,
    settings: ImportSettings,
}

impl BulkImportExecutor {
    pub fn new(
        slot_requester: Arc<dyn UploadSlotRequester>,
        transfer: Arc<dyn PayloadTransfer>,
        trigger: Arc<dyn BulkJobTrigger>,
        webhooks: Arc<dyn WebhookRegistrar>,
        settings: ImportSettings,
    ) -> Self {
        Self {
            slot_requester,
            transfer,
            trigger,
            webhooks,
            settings,
        }
    }

    /// Executor поверх настоящего Admin API (клиент общий с каталогом)
    pub fn with_client(
        graphql: Arc<AdminGraphqlClient>,
        config: &Config,
    ) -> Result<Self, StorefrontError> {
        let api = Arc::new(StorefrontBulkApi::new(graphql));
        let transport = Arc::new(StagedUploadTransport::new(Duration::from_secs(
            config.storefront.request_timeout_secs,
        ))?);

        Ok(Self::new(
            api.clone(),
            transport,
            api.clone(),
            api,
            ImportSettings::from_config(config),
        ))
    }

    /// Выполнить прогон целиком
    pub async fn run(&self, request: ImportRequest) -> Result<ImportResponse, ImportFailure> {
        let run_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();
        let mut tracker = RunTracker::new(run_id.clone());

        let fail = |error: ImportError, job: Option<BulkJob>| {
            tracing::error!("Bulk import {} failed: {}", run_id, error);
            ImportFailure {
                run_id: run_id.clone(),
                error,
                job,
            }
        };

        if request.records.is_empty() {
            return Err(fail(ImportError::EmptyBatch, None));
        }

        let callback_url = request
            .callback_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(self.settings.callback_url.as_str())
            .to_string();

        tracing::info!(
            "Bulk import {}: starting with {} records",
            run_id,
            request.records.len()
        );

        let slot = match self.request_upload_slot(request.filename.as_deref()).await {
            Ok(slot) => slot,
            Err(e) => {
                tracker.advance(RunState::SlotRequestFailed);
                return Err(fail(e, None));
            }
        };
        tracker.advance(RunState::SlotRequested);

        let staged_path = match self.transfer_payload(&slot, &request.records).await {
            Ok(key) => key,
            Err(e) => {
                tracker.advance(RunState::PayloadFailed);
                return Err(fail(e, None));
            }
        };
        tracker.advance(RunState::PayloadSent);

        let job = match self.trigger_bulk_job(&staged_path).await {
            Ok(job) => job,
            Err(e) => {
                tracker.advance(RunState::TriggerFailed);
                return Err(fail(e, None));
            }
        };
        tracker.advance(RunState::JobTriggered);

        let subscription = match self.maybe_register_webhook(&job, &callback_url).await {
            Ok(subscription) => subscription,
            Err(e) => {
                tracker.advance(RunState::SubscribeFailed);
                return Err(fail(e, Some(job)));
            }
        };

        match subscription {
            Some(_) => tracker.advance(RunState::Subscribed),
            None => {
                tracker.advance(RunState::Skipped);
                if !job.errors.is_empty() {
                    return Err(fail(
                        ImportError::BusinessValidation { job: job.clone() },
                        Some(job),
                    ));
                }
            }
        }

        debug_assert!(tracker.state.is_terminal());
        Ok(ImportResponse {
            run_id,
            state: tracker.state,
            record_count: request.records.len(),
            staged_path: Some(staged_path),
            job: Some(job),
            subscription,
            started_at,
            finished_at: Utc::now(),
        })
    }

    /// Шаг 1: запросить слот для загрузки JSONL
    pub async fn request_upload_slot(&self, filename: Option<&str>) -> Result<UploadSlot, ImportError> {
        let request = SlotRequest::bulk_mutation_variables(filename, &self.settings.default_filename);

        let slot = self
            .slot_requester
            .request_upload_slot(&request)
            .await
            .map_err(ImportError::SlotRequest)?;

        tracing::info!(
            "Upload slot for {} received ({} signed fields)",
            request.filename,
            slot.signed_fields.len()
        );
        Ok(slot)
    }

    /// Шаг 2: сериализовать пакет и отправить его в слот, вернуть `key`
    pub async fn transfer_payload(
        &self,
        slot: &UploadSlot,
        records: &[ProductRecord],
    ) -> Result<String, ImportError> {
        let content = to_ndjson(records)
            .map_err(|e| ImportError::Configuration(format!("cannot serialize batch: {}", e)))?;

        // Форма собирается до отправки: без `key` в сеть не идем
        let form = MultipartPayload::for_slot(slot, content)?;
        let staged_path = form.staged_path().to_string();

        self.transfer
            .submit(slot.upload_url(), form)
            .await
            .map_err(ImportError::Transfer)?;

        Ok(staged_path)
    }

    /// Шаг 3: запустить bulk-мутацию по загруженному файлу
    pub async fn trigger_bulk_job(&self, staged_path: &str) -> Result<BulkJob, ImportError> {
        let job = self
            .trigger
            .run_bulk_mutation(&self.settings.mutation_template, staged_path)
            .await
            .map_err(ImportError::Trigger)?;

        tracing::info!(
            "Bulk operation {} status {} ({} user errors)",
            job.id.as_deref().unwrap_or("-"),
            job.status,
            job.errors.len()
        );
        Ok(job)
    }

    /// Шаг 4: подписаться на завершение, только если операция создана
    pub async fn maybe_register_webhook(
        &self,
        job: &BulkJob,
        callback_url: &str,
    ) -> Result<Option<WebhookSubscription>, ImportError> {
        match &job.status {
            BulkJobStatus::Created => {
                let subscription = self
                    .webhooks
                    .create_subscription(BULK_OPERATIONS_FINISH_TOPIC, callback_url, WebhookFormat::Json)
                    .await
                    .map_err(ImportError::WebhookRegistration)?;
                Ok(Some(subscription))
            }
            BulkJobStatus::Running
            | BulkJobStatus::Completed
            | BulkJobStatus::Canceling
            | BulkJobStatus::Canceled
            | BulkJobStatus::Failed
            | BulkJobStatus::Expired => {
                tracing::info!("Bulk operation status {}, webhook not registered", job.status);
                Ok(None)
            }
            BulkJobStatus::Unknown(raw) => {
                tracing::warn!("Unknown bulk operation status '{}', webhook not registered", raw);
                Ok(None)
            }
        }
    }
}
