use serde::{Deserialize, Serialize};

use super::record::ProductRecord;

/// Ответ списка товаров витрины
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductRecord>,
    /// Сколько товаров запрашивали
    pub take: u32,
}
