use axum::Json;
use contracts::shared::shipping_rate::{ShippingRate, ShippingRateRequest, ShippingRateResponse};

/// Фиксированные тарифы доставки (расчета стоимости пока нет)
pub fn fixed_rates() -> Vec<ShippingRate> {
    vec![
        ShippingRate {
            service_name: "Giao hàng tiết kiệm".to_string(),
            description: "Giao trong 5 ngày".to_string(),
            service_code: "STANDARD".to_string(),
            currency: "VND".to_string(),
            total_price: 10000,
            phone_required: None,
            min_delivery_date: None,
            max_delivery_date: None,
        },
        ShippingRate {
            service_name: "Giao hàng nhanh".to_string(),
            description: "Giao trong 2 ngày".to_string(),
            service_code: "EXPRESS".to_string(),
            currency: "VND".to_string(),
            total_price: 20000,
            phone_required: None,
            min_delivery_date: None,
            max_delivery_date: None,
        },
    ]
}

/// POST /api/shipping/rates
///
/// Callback carrier service. Тело запроса разбирается, но на тарифы не влияет.
pub async fn rates(Json(request): Json<ShippingRateRequest>) -> Json<ShippingRateResponse> {
    if let Some(rate) = &request.rate {
        tracing::debug!(
            "Shipping rate request: {} items to {}",
            rate.items.len(),
            rate.destination.country.as_deref().unwrap_or("-")
        );
    }

    Json(ShippingRateResponse {
        rates: fixed_rates(),
    })
}
