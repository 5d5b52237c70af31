use async_trait::async_trait;
use contracts::domain::a007_storefront_product::ProductRecord;
use serde::Deserialize;

use super::{AdminGraphqlClient, StorefrontError};

const GET_PRODUCTS_QUERY: &str = r#"
query GetProducts($first: Int) {
  products(first: $first) {
    edges {
      node {
        id
        title
        handle
        productType
        status
        mediaCount
        totalInventory
        vendor
        totalVariants
        featuredImage {
          url
        }
        resourcePublicationOnCurrentPublication {
          publication {
            id
          }
          publishDate
          isPublished
        }
      }
    }
  }
}
"#;

/// Сколько товаров показывать, если `take` не передан
pub const DEFAULT_TAKE: u32 = 10;

// API не отдает больше 250 узлов за запрос
const MAX_TAKE: u32 = 250;

/// Сколько товаров реально будет запрошено: от 1 до 250
pub fn clamp_take(take: u32) -> u32 {
    take.clamp(1, MAX_TAKE)
}

#[derive(Debug, Deserialize)]
struct ProductsData {
    products: ProductConnection,
}

#[derive(Debug, Deserialize)]
struct ProductConnection {
    #[serde(default)]
    edges: Vec<ProductEdge>,
}

#[derive(Debug, Deserialize)]
struct ProductEdge {
    node: ProductRecord,
}

/// Получить первые `take` товаров каталога
pub async fn fetch_products(
    client: &AdminGraphqlClient,
    take: u32,
) -> Result<Vec<ProductRecord>, StorefrontError> {
    let first = clamp_take(take);
    let data: ProductsData = client
        .execute(
            "GetProducts",
            GET_PRODUCTS_QUERY,
            serde_json::json!({ "first": first }),
        )
        .await?;

    let products: Vec<ProductRecord> = data.products.edges.into_iter().map(|e| e.node).collect();
    tracing::info!("Fetched {} products from storefront", products.len());
    Ok(products)
}

/// Источник товаров для синхронизации
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_products(&self, take: u32) -> Result<Vec<ProductRecord>, StorefrontError>;
}

#[async_trait]
impl CatalogSource for AdminGraphqlClient {
    async fn fetch_products(&self, take: u32) -> Result<Vec<ProductRecord>, StorefrontError> {
        fetch_products(self, take).await
    }
}
