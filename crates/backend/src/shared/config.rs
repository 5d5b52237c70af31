use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storefront: StorefrontConfig,
    pub bulk_import: BulkImportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Подключение к Admin API витрины
#[derive(Debug, Deserialize, Clone)]
pub struct StorefrontConfig {
    /// Домен магазина, например `my-shop.myshopify.com`
    pub shop_domain: String,
    pub api_version: String,
    /// Токен Admin API (можно переопределить через STOREFRONT_ACCESS_TOKEN)
    #[serde(default)]
    pub access_token: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BulkImportConfig {
    /// Callback для вебхука BULK_OPERATIONS_FINISH
    pub callback_url: String,
    #[serde(default = "default_filename")]
    pub default_filename: String,
    /// Шаблон мутации, который платформа применит к каждой строке JSONL
    #[serde(default)]
    pub mutation_template: Option<String>,
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_filename() -> String {
    "data.jsonl".to_string()
}

impl StorefrontConfig {
    /// Адрес GraphQL endpoint-а Admin API
    pub fn graphql_endpoint(&self) -> String {
        format!(
            "https://{}/admin/api/{}/graphql.json",
            self.shop_domain.trim_end_matches('/'),
            self.api_version
        )
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000

[storefront]
shop_domain = "example.myshopify.com"
api_version = "2023-07"
access_token = ""
request_timeout_secs = 30

[bulk_import]
callback_url = "https://example.com/webhooks/bulk-operations-finish"
default_filename = "data.jsonl"
"#;

const ACCESS_TOKEN_ENV: &str = "STOREFRONT_ACCESS_TOKEN";

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// The access token from the environment wins over the file.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = read_config_file()?;

    if let Ok(token) = std::env::var(ACCESS_TOKEN_ENV) {
        if !token.trim().is_empty() {
            tracing::info!("Using access token from {}", ACCESS_TOKEN_ENV);
            config.storefront.access_token = token;
        }
    }

    if config.storefront.access_token.trim().is_empty() {
        tracing::warn!("Storefront access token is empty, remote calls will be rejected");
    }

    Ok(config)
}

fn read_config_file() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.bulk_import.default_filename, "data.jsonl");
        assert!(config.bulk_import.mutation_template.is_none());
        assert_eq!(
            config.storefront.graphql_endpoint(),
            "https://example.myshopify.com/admin/api/2023-07/graphql.json"
        );
    }

    #[test]
    fn test_optional_fields_fall_back_to_defaults() {
        let config = parse_config(
            r#"
            [server]
            port = 8080

            [storefront]
            shop_domain = "shop.myshopify.com/"
            api_version = "2024-01"

            [bulk_import]
            callback_url = "https://hooks.example.com/bulk"
            "#,
        )
        .unwrap();

        assert_eq!(config.storefront.request_timeout_secs, 30);
        assert_eq!(config.storefront.access_token, "");
        assert_eq!(config.bulk_import.default_filename, "data.jsonl");
        assert_eq!(
            config.storefront.graphql_endpoint(),
            "https://shop.myshopify.com/admin/api/2024-01/graphql.json"
        );
    }

    #[test]
    fn test_missing_section_is_an_error() {
        assert!(parse_config("[server]\nport = 1").is_err());
    }
}
