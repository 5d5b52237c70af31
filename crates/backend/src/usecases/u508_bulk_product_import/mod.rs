//! UseCase u508: bulk-импорт товаров в витрину
//!
//! Пайплайн из четырех шагов: слот для загрузки, отправка JSONL,
//! запуск bulk-мутации, подписка на ее завершение.

pub mod capabilities;
pub mod error;
pub mod executor;
pub mod payload;
pub mod slot;
pub mod staged_upload_transport;
pub mod storefront_api_client;

pub use error::ImportError;
pub use executor::{BulkImportExecutor, ImportFailure, ImportSettings};
