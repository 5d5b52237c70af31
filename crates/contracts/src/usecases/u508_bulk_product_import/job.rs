use serde::{Deserialize, Serialize};

// ============================================================================
// Bulk operation
// ============================================================================

/// Статус bulk-операции на стороне платформы
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkJobStatus {
    Created,
    Running,
    Completed,
    Canceling,
    Canceled,
    Failed,
    Expired,
    /// Значение, которого нет в списке известных (или операция не вернулась)
    Unknown(String),
}

impl BulkJobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BulkJobStatus::Created => "CREATED",
            BulkJobStatus::Running => "RUNNING",
            BulkJobStatus::Completed => "COMPLETED",
            BulkJobStatus::Canceling => "CANCELING",
            BulkJobStatus::Canceled => "CANCELED",
            BulkJobStatus::Failed => "FAILED",
            BulkJobStatus::Expired => "EXPIRED",
            BulkJobStatus::Unknown(raw) => raw.as_str(),
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "CREATED" => BulkJobStatus::Created,
            "RUNNING" => BulkJobStatus::Running,
            "COMPLETED" => BulkJobStatus::Completed,
            "CANCELING" => BulkJobStatus::Canceling,
            "CANCELED" => BulkJobStatus::Canceled,
            "FAILED" => BulkJobStatus::Failed,
            "EXPIRED" => BulkJobStatus::Expired,
            other => BulkJobStatus::Unknown(other.to_string()),
        }
    }
}

impl std::fmt::Display for BulkJobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BulkJobStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BulkJobStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(BulkJobStatus::from_code(&s))
    }
}

/// Ошибка валидации, которую вернула платформа (`userErrors`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserError {
    /// Путь к полю, например `["input"]`; может отсутствовать
    #[serde(default, deserialize_with = "field_path::deserialize")]
    pub field: Vec<String>,
    pub message: String,
}

impl UserError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: vec![field.to_string()],
            message: message.into(),
        }
    }
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.field.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.field.join("."), self.message)
        }
    }
}

// `field` приходит как null, строка или массив строк
mod field_path {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        One(String),
        Many(Vec<String>),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Raw>::deserialize(deserializer)? {
            None => Vec::new(),
            Some(Raw::One(s)) => vec![s],
            Some(Raw::Many(v)) => v,
        })
    }
}

/// Bulk-операция, созданная запуском мутации
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkJob {
    pub id: Option<String>,
    pub url: Option<String>,
    pub status: BulkJobStatus,
    #[serde(default)]
    pub errors: Vec<UserError>,
}

// ============================================================================
// Webhook subscription
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WebhookFormat {
    Json,
    Xml,
}

/// Подписка на событие завершения bulk-операции
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookSubscription {
    pub id: Option<String>,
    pub topic: String,
    pub callback_url: String,
    pub format: WebhookFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip_keeps_unknown_value() {
        let status: BulkJobStatus = serde_json::from_str(r#""SCHEDULED""#).unwrap();
        assert_eq!(status, BulkJobStatus::Unknown("SCHEDULED".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""SCHEDULED""#);

        let created: BulkJobStatus = serde_json::from_str(r#""CREATED""#).unwrap();
        assert_eq!(created, BulkJobStatus::Created);
    }

    #[test]
    fn test_user_error_field_variants() {
        let errors: Vec<UserError> = serde_json::from_str(
            r#"[
                {"field": ["input", "title"], "message": "blank"},
                {"field": "input", "message": "invalid"},
                {"field": null, "message": "general"}
            ]"#,
        )
        .unwrap();

        assert_eq!(errors[0].to_string(), "input.title: blank");
        assert_eq!(errors[1], UserError::new("input", "invalid"));
        assert!(errors[2].field.is_empty());
    }

    #[test]
    fn test_webhook_format_is_uppercase() {
        assert_eq!(serde_json::to_string(&WebhookFormat::Json).unwrap(), r#""JSON""#);
    }
}
