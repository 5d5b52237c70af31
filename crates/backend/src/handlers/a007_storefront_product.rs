use axum::{
    extract::{Query, State},
    Json,
};
use contracts::domain::a007_storefront_product::ProductListResponse;
use serde::Deserialize;

use crate::routes::AppState;
use crate::shared::storefront::products::{clamp_take, DEFAULT_TAKE};

#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    pub take: Option<u32>,
}

/// GET /api/products?take=10
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<ProductListResponse>, axum::http::StatusCode> {
    let take = clamp_take(query.take.unwrap_or(DEFAULT_TAKE));

    match state.catalog.fetch_products(take).await {
        Ok(products) => Ok(Json(ProductListResponse { products, take })),
        Err(e) => {
            tracing::error!("Failed to fetch storefront products: {}", e);
            Err(axum::http::StatusCode::BAD_GATEWAY)
        }
    }
}
