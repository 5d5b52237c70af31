use contracts::usecases::u508_bulk_product_import::UserError;
use thiserror::Error;

/// Ошибка обращения к витрине (Admin GraphQL API или staged upload)
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Storefront returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("GraphQL errors: {}", .0.join("; "))]
    Graphql(Vec<String>),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Response has no {0}")]
    MissingData(String),

    #[error("User errors: {}", join_user_errors(.0))]
    UserErrors(Vec<UserError>),
}

impl StorefrontError {
    /// Ошибки полей, если платформа их вернула
    pub fn user_errors(&self) -> &[UserError] {
        match self {
            StorefrontError::UserErrors(errors) => errors,
            _ => &[],
        }
    }
}

fn join_user_errors(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Первые 500 символов тела ответа для логов и сообщений об ошибках
pub fn preview(body: &str) -> String {
    let preview: String = body.chars().take(500).collect();
    if preview.len() < body.len() {
        format!("{}...", preview)
    } else {
        preview
    }
}
