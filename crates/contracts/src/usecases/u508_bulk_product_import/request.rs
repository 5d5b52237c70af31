use serde::{Deserialize, Serialize};

use crate::domain::a007_storefront_product::ProductRecord;

/// Запрос на bulk-импорт переданного пакета товаров
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRequest {
    /// Товары в порядке, в котором они попадут в JSONL
    pub records: Vec<ProductRecord>,

    /// Куда платформа пришлет событие завершения операции
    /// (если не указан, берется из конфигурации)
    #[serde(default)]
    pub callback_url: Option<String>,

    /// Имя файла для staged upload (по умолчанию `data.jsonl`)
    #[serde(default)]
    pub filename: Option<String>,
}

/// Запрос на синхронизацию каталога: товары берутся из самой витрины
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncRequest {
    /// Сколько товаров взять из каталога
    #[serde(default)]
    pub take: Option<u32>,

    #[serde(default)]
    pub callback_url: Option<String>,

    #[serde(default)]
    pub filename: Option<String>,
}
