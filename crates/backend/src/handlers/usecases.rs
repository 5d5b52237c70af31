use axum::{extract::State, http::StatusCode, Json};
use contracts::usecases::u508_bulk_product_import::{
    ImportErrorResponse, ImportRequest, ImportResponse, RunState, SyncRequest,
};

use crate::routes::AppState;
use crate::shared::storefront::products::{clamp_take, DEFAULT_TAKE};
use crate::usecases::u508_bulk_product_import::{ImportError, ImportFailure};

type ImportResult = Result<Json<ImportResponse>, (StatusCode, Json<ImportErrorResponse>)>;

// ============================================================================
// UseCase u508: Bulk product import
// ============================================================================

/// POST /api/u508/import/start
pub async fn u508_start_import(
    State(state): State<AppState>,
    Json(request): Json<ImportRequest>,
) -> ImportResult {
    match state.executor.run(request).await {
        Ok(response) => Ok(Json(response)),
        Err(failure) => Err(failure_response(&failure)),
    }
}

/// POST /api/u508/import/sync
///
/// Берет первые `take` товаров из каталога витрины и запускает по ним импорт.
pub async fn u508_sync_catalog(
    State(state): State<AppState>,
    Json(request): Json<SyncRequest>,
) -> ImportResult {
    let take = clamp_take(request.take.unwrap_or(DEFAULT_TAKE));

    let records = match state.catalog.fetch_products(take).await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("Failed to read catalog for sync: {}", e);
            return Err((
                StatusCode::BAD_GATEWAY,
                Json(ImportErrorResponse {
                    run_id: String::new(),
                    state: RunState::Init,
                    code: "CATALOG_ERROR".to_string(),
                    message: e.to_string(),
                    user_errors: e.user_errors().to_vec(),
                    job: None,
                }),
            ));
        }
    };

    let import = ImportRequest {
        records,
        callback_url: request.callback_url,
        filename: request.filename,
    };

    match state.executor.run(import).await {
        Ok(response) => Ok(Json(response)),
        Err(failure) => Err(failure_response(&failure)),
    }
}

fn status_for(error: &ImportError) -> StatusCode {
    match error {
        ImportError::EmptyBatch => StatusCode::BAD_REQUEST,
        ImportError::BusinessValidation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ImportError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ImportError::SlotRequest(_)
        | ImportError::Transfer(_)
        | ImportError::Trigger(_)
        | ImportError::WebhookRegistration(_) => StatusCode::BAD_GATEWAY,
    }
}

fn failure_response(failure: &ImportFailure) -> (StatusCode, Json<ImportErrorResponse>) {
    tracing::error!("Bulk import failed: {}", failure);
    (status_for(&failure.error), Json(failure.to_response()))
}
