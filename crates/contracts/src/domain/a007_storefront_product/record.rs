use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Product record
// ============================================================================

/// Товар витрины в плоском виде (одна строка bulk-импорта)
///
/// Поля соответствуют узлу `products.edges.node` Admin GraphQL API.
/// Неизвестные атрибуты сохраняются в `extra` и сериализуются как есть.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductRecord {
    /// ID товара: число для локальных данных или GID (`gid://shopify/Product/..`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    #[serde(rename = "productType", default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,

    /// ACTIVE / DRAFT / ARCHIVED
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    #[serde(rename = "totalInventory", default, skip_serializing_if = "Option::is_none")]
    pub total_inventory: Option<i64>,

    #[serde(rename = "mediaCount", default, skip_serializing_if = "Option::is_none")]
    pub media_count: Option<i64>,

    #[serde(rename = "totalVariants", default, skip_serializing_if = "Option::is_none")]
    pub total_variants: Option<i64>,

    #[serde(rename = "featuredImage", default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<FeaturedImage>,

    /// Информация о публикации на текущем канале продаж
    #[serde(
        rename = "resourcePublicationOnCurrentPublication",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub publication: Option<ResourcePublication>,

    /// Прочие атрибуты, которые пришли из источника каталога
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedImage {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourcePublication {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication: Option<PublicationRef>,

    #[serde(rename = "publishDate", default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,

    #[serde(rename = "isPublished", default)]
    pub is_published: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicationRef {
    pub id: String,
}

impl ProductRecord {
    /// Короткое представление товара для логов
    pub fn display_name(&self) -> String {
        let id = match &self.id {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "-".to_string(),
        };
        format!("{} - {}", id, self.title.as_deref().unwrap_or(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_record_serializes_without_empty_fields() {
        let record = ProductRecord {
            id: Some(Value::from(1)),
            title: Some("T".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"id":1,"title":"T"}"#);
    }

    #[test]
    fn test_graphql_node_deserializes() {
        let node = r#"{
            "id": "gid://shopify/Product/42",
            "title": "Кружка",
            "handle": "mug",
            "productType": "Посуда",
            "status": "ACTIVE",
            "mediaCount": 2,
            "totalInventory": 15,
            "vendor": "Acme",
            "totalVariants": 3,
            "featuredImage": { "url": "https://cdn.example.com/mug.png" },
            "resourcePublicationOnCurrentPublication": {
                "publication": { "id": "gid://shopify/Publication/1" },
                "publishDate": "2023-08-01T10:00:00Z",
                "isPublished": true
            },
            "tags": ["new"]
        }"#;

        let record: ProductRecord = serde_json::from_str(node).unwrap();
        assert_eq!(record.product_type.as_deref(), Some("Посуда"));
        assert_eq!(record.total_variants, Some(3));
        assert!(record.publication.as_ref().unwrap().is_published);
        assert_eq!(record.extra.get("tags"), Some(&serde_json::json!(["new"])));
        assert_eq!(record.display_name(), "gid://shopify/Product/42 - Кружка");
    }
}
