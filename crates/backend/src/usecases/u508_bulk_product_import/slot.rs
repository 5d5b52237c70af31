use serde::{Deserialize, Serialize};

use super::error::ImportError;

/// MIME-тип файла с товарами
pub const PAYLOAD_MIME_TYPE: &str = "text/jsonl";

/// Ресурс staged upload, под который запрашивается слот
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StagedUploadResource {
    BulkMutationVariables,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UploadHttpMethod {
    Post,
}

/// Параметры запроса слота для загрузки
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRequest {
    pub resource: StagedUploadResource,
    pub filename: String,
    pub mime_type: String,
    pub http_method: UploadHttpMethod,
}

impl SlotRequest {
    /// Запрос слота под JSONL с переменными bulk-мутации.
    /// Пустое имя файла заменяется на `default_filename`.
    pub fn bulk_mutation_variables(filename: Option<&str>, default_filename: &str) -> Self {
        let filename = filename
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(default_filename);

        Self {
            resource: StagedUploadResource::BulkMutationVariables,
            filename: filename.to_string(),
            mime_type: PAYLOAD_MIME_TYPE.to_string(),
            http_method: UploadHttpMethod::Post,
        }
    }
}

/// Подписанное поле формы, выданное платформой вместе со слотом
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedField {
    pub name: String,
    pub value: String,
}

impl SignedField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Одноразовая цель для загрузки файла
///
/// Порядок `signed_fields` совпадает с ответом платформы.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSlot {
    pub target_url: String,
    pub resource_url: Option<String>,
    pub signed_fields: Vec<SignedField>,
}

impl UploadSlot {
    /// Значение подписанного поля с именем `name`
    ///
    /// Поле должно встречаться ровно один раз, иначе слот считается битым.
    pub fn field(&self, name: &str) -> Result<&str, ImportError> {
        let mut matches = self.signed_fields.iter().filter(|f| f.name == name);

        let field = matches.next().ok_or_else(|| {
            ImportError::Configuration(format!("upload slot has no signed field '{}'", name))
        })?;

        if matches.next().is_some() {
            return Err(ImportError::Configuration(format!(
                "upload slot has duplicate signed field '{}'",
                name
            )));
        }

        Ok(field.value.as_str())
    }

    /// Адрес, на который отправляется форма: `resource_url`, если он есть
    pub fn upload_url(&self) -> &str {
        match self.resource_url.as_deref() {
            Some(url) if !url.trim().is_empty() => url,
            _ => &self.target_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(fields: &[(&str, &str)]) -> UploadSlot {
        UploadSlot {
            target_url: "https://storage.example.com/target".to_string(),
            resource_url: None,
            signed_fields: fields
                .iter()
                .map(|(n, v)| SignedField::new(*n, *v))
                .collect(),
        }
    }

    #[test]
    fn test_slot_request_falls_back_to_default_filename() {
        let request = SlotRequest::bulk_mutation_variables(Some("  "), "data.jsonl");
        assert_eq!(request.filename, "data.jsonl");
        assert_eq!(request.mime_type, "text/jsonl");

        let request = SlotRequest::bulk_mutation_variables(Some("products.jsonl"), "data.jsonl");
        assert_eq!(request.filename, "products.jsonl");
    }

    #[test]
    fn test_slot_request_serializes_as_staged_upload_input() {
        let request = SlotRequest::bulk_mutation_variables(None, "data.jsonl");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "resource": "BULK_MUTATION_VARIABLES",
                "filename": "data.jsonl",
                "mimeType": "text/jsonl",
                "httpMethod": "POST"
            })
        );
    }

    #[test]
    fn test_field_lookup() {
        let slot = slot(&[("key", "tmp/1/bulk/data.jsonl"), ("policy", "abc")]);
        assert_eq!(slot.field("key").unwrap(), "tmp/1/bulk/data.jsonl");
        assert_eq!(slot.field("policy").unwrap(), "abc");
    }

    #[test]
    fn test_missing_field_is_configuration_error() {
        let slot = slot(&[("policy", "abc")]);
        for _ in 0..2 {
            assert!(matches!(slot.field("key"), Err(ImportError::Configuration(_))));
        }
    }

    #[test]
    fn test_duplicate_field_is_configuration_error() {
        let slot = slot(&[("key", "a"), ("key", "b")]);
        let err = slot.field("key").unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_upload_url_prefers_resource_url() {
        let mut slot = slot(&[]);
        assert_eq!(slot.upload_url(), "https://storage.example.com/target");

        slot.resource_url = Some(String::new());
        assert_eq!(slot.upload_url(), "https://storage.example.com/target");

        slot.resource_url = Some("https://storage.example.com/resource".to_string());
        assert_eq!(slot.upload_url(), "https://storage.example.com/resource");
    }
}
