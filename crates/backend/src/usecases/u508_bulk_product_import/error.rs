use contracts::usecases::u508_bulk_product_import::{BulkJob, RunState, UserError};
use thiserror::Error;

use crate::shared::storefront::StorefrontError;

/// Ошибка прогона bulk-импорта с привязкой к шагу, на котором он упал
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Batch is empty, nothing to import")]
    EmptyBatch,

    #[error("Upload slot request failed: {0}")]
    SlotRequest(#[source] StorefrontError),

    #[error("Invalid upload slot: {0}")]
    Configuration(String),

    #[error("Payload transfer failed: {0}")]
    Transfer(#[source] StorefrontError),

    #[error("Bulk job trigger failed: {0}")]
    Trigger(#[source] StorefrontError),

    /// Запрос прошел, но платформа не приняла операцию
    #[error("Bulk job was not created (status {}): {} user error(s)", .job.status, .job.errors.len())]
    BusinessValidation { job: BulkJob },

    #[error("Webhook registration failed: {0}")]
    WebhookRegistration(#[source] StorefrontError),
}

impl ImportError {
    /// Машинный код для ответа API
    pub fn code(&self) -> &'static str {
        match self {
            ImportError::EmptyBatch => "EMPTY_BATCH",
            ImportError::SlotRequest(_) => "SLOT_REQUEST_ERROR",
            ImportError::Configuration(_) => "CONFIGURATION_ERROR",
            ImportError::Transfer(_) => "TRANSFER_ERROR",
            ImportError::Trigger(_) => "TRIGGER_ERROR",
            ImportError::BusinessValidation { .. } => "BUSINESS_VALIDATION_ERROR",
            ImportError::WebhookRegistration(_) => "WEBHOOK_REGISTRATION_ERROR",
        }
    }

    /// Состояние, в котором остановился прогон
    pub fn failed_state(&self) -> RunState {
        match self {
            ImportError::EmptyBatch => RunState::Init,
            ImportError::SlotRequest(_) => RunState::SlotRequestFailed,
            ImportError::Configuration(_) | ImportError::Transfer(_) => RunState::PayloadFailed,
            ImportError::Trigger(_) => RunState::TriggerFailed,
            ImportError::BusinessValidation { .. } => RunState::Skipped,
            ImportError::WebhookRegistration(_) => RunState::SubscribeFailed,
        }
    }

    /// Ошибки полей от платформы, которые можно показать пользователю
    pub fn user_errors(&self) -> Vec<UserError> {
        match self {
            ImportError::BusinessValidation { job } => job.errors.clone(),
            ImportError::SlotRequest(e)
            | ImportError::Transfer(e)
            | ImportError::Trigger(e)
            | ImportError::WebhookRegistration(e) => e.user_errors().to_vec(),
            ImportError::EmptyBatch | ImportError::Configuration(_) => Vec::new(),
        }
    }

    /// Удаленный вызов прошел, а отказ пришел как бизнес-валидация
    pub fn is_business_validation(&self) -> bool {
        matches!(self, ImportError::BusinessValidation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::usecases::u508_bulk_product_import::BulkJobStatus;

    #[test]
    fn test_business_validation_exposes_job_errors() {
        let err = ImportError::BusinessValidation {
            job: BulkJob {
                id: None,
                url: None,
                status: BulkJobStatus::Failed,
                errors: vec![UserError::new("input", "invalid")],
            },
        };

        assert_eq!(err.code(), "BUSINESS_VALIDATION_ERROR");
        assert_eq!(err.failed_state(), RunState::Skipped);
        assert_eq!(err.user_errors(), vec![UserError::new("input", "invalid")]);
        assert_eq!(
            err.to_string(),
            "Bulk job was not created (status FAILED): 1 user error(s)"
        );
        assert!(err.is_business_validation());
    }

    #[test]
    fn test_webhook_user_errors_are_forwarded() {
        let err = ImportError::WebhookRegistration(StorefrontError::UserErrors(vec![
            UserError::new("callbackUrl", "is invalid"),
        ]));

        assert_eq!(err.failed_state(), RunState::SubscribeFailed);
        assert_eq!(err.user_errors().len(), 1);
        assert!(!err.is_business_validation());
    }

    #[test]
    fn test_configuration_error_belongs_to_payload_stage() {
        let err = ImportError::Configuration("upload slot has no signed field 'key'".into());
        assert_eq!(err.failed_state(), RunState::PayloadFailed);
        assert!(err.user_errors().is_empty());
    }
}
