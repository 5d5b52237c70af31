pub mod job;
pub mod request;
pub mod response;

pub use job::{BulkJob, BulkJobStatus, UserError, WebhookFormat, WebhookSubscription};
pub use request::{ImportRequest, SyncRequest};
pub use response::{ImportErrorResponse, ImportResponse, RunState};

use crate::usecases::common::UseCaseMetadata;

pub struct ImportProductsBulk;

impl UseCaseMetadata for ImportProductsBulk {
    fn usecase_index() -> &'static str {
        "u508"
    }

    fn usecase_name() -> &'static str {
        "bulk_product_import"
    }

    fn display_name() -> &'static str {
        "Синхронизация товаров"
    }

    fn description() -> &'static str {
        "Загрузка пакета товаров в витрину через staged upload и bulk-мутацию"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        assert_eq!(ImportProductsBulk::full_name(), "u508_bulk_product_import");
    }
}
