//! Модели callback-а carrier service (расчет стоимости доставки)

use serde::{Deserialize, Serialize};

// ============================================================================
// Request
// ============================================================================

/// Адрес отправителя или получателя
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingRateAddress {
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub name: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub email: Option<String>,
    pub address_type: Option<String>,
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingRateItem {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub quantity: Option<i64>,
    pub grams: Option<i64>,
    /// Цена в минимальных единицах валюты
    pub price: Option<i64>,
    pub vendor: Option<String>,
    pub requires_shipping: Option<bool>,
    pub taxable: Option<bool>,
    pub fulfillment_service: Option<String>,
    pub properties: Option<serde_json::Value>,
    pub product_id: Option<i64>,
    pub variant_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingRateDetails {
    pub origin: ShippingRateAddress,
    pub destination: ShippingRateAddress,
    pub items: Vec<ShippingRateItem>,
    pub currency: Option<String>,
    pub locale: Option<String>,
}

/// Тело запроса, которое платформа шлет на callback carrier service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingRateRequest {
    pub rate: Option<ShippingRateDetails>,
}

// ============================================================================
// Response
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingRate {
    pub service_name: String,
    pub description: String,
    pub service_code: String,
    pub currency: String,
    pub total_price: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_delivery_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_delivery_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingRateResponse {
    pub rates: Vec<ShippingRate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_request_deserializes() {
        let request: ShippingRateRequest = serde_json::from_str(
            r#"{"rate": {"destination": {"country": "VN"}, "items": [{"sku": "A-1", "quantity": 2}]}}"#,
        )
        .unwrap();

        let rate = request.rate.unwrap();
        assert_eq!(rate.destination.country.as_deref(), Some("VN"));
        assert_eq!(rate.items[0].quantity, Some(2));
        assert!(rate.currency.is_none());
    }

    #[test]
    fn test_empty_request_deserializes() {
        let request: ShippingRateRequest = serde_json::from_str("{}").unwrap();
        assert!(request.rate.is_none());
    }
}
