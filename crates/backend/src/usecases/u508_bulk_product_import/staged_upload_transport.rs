use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;

use super::capabilities::PayloadTransfer;
use super::payload::{MultipartPayload, FILE_FIELD};
use crate::shared::storefront::error::preview;
use crate::shared::storefront::StorefrontError;

/// Отправка файла в хранилище по подписанной форме
///
/// Хранилище чужое: токен Admin API сюда не передается.
pub struct StagedUploadTransport {
    client: reqwest::Client,
}

impl StagedUploadTransport {
    pub fn new(timeout: Duration) -> Result<Self, StorefrontError> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }
}

fn build_form(payload: MultipartPayload) -> Result<Form, StorefrontError> {
    let mut form = Form::new();
    for field in payload.fields {
        form = form.text(field.name, field.value);
    }

    let file = Part::bytes(payload.content)
        .file_name(payload.file_name)
        .mime_str(&payload.mime_type)?;

    Ok(form.part(FILE_FIELD, file))
}

#[async_trait]
impl PayloadTransfer for StagedUploadTransport {
    async fn submit(&self, url: &str, payload: MultipartPayload) -> Result<(), StorefrontError> {
        let size = payload.content.len();
        tracing::info!("Staged upload POST {} ({} bytes)", url, size);

        let form = build_form(payload)?;
        let response = self.client.post(url).multipart(form).send().await?;

        let status = response.status();
        tracing::info!("Staged upload POST -> {}", status.as_u16());

        // Тело ответа хранилища не нужно, проверяем только статус
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Staged upload failed: {}", preview(&body));
            return Err(StorefrontError::Status {
                status: status.as_u16(),
                body: preview(&body),
            });
        }

        Ok(())
    }
}
