use super::defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub google: GoogleSettings,
    #[serde(default)]
    pub limits: LimitsSettings,
    #[serde(default)]
    pub performance: PerformanceSettings,
    #[serde(default)]
    pub security: SecuritySettings,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of HTTP workers (0 = one per CPU core)
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for log files (default: "./logs")
    #[serde(default = "default_logs_path")]
    pub logs_path: String,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    /// "compact" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Optional per-target log level overrides.
    /// Configure via a TOML table:
    /// [logging.targets]
    /// sheetful_gateway = "debug"
    /// reqwest = "warn"
    #[serde(default)]
    pub targets: HashMap<String, String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            logs_path: default_logs_path(),
            log_to_console: true,
            format: default_log_format(),
            targets: HashMap::new(),
        }
    }
}

/// Remote sheet store (Google Sheets v4) settings
#[derive(Clone, Serialize, Deserialize)]
pub struct GoogleSettings {
    /// Process-wide static API key used when a request carries no access token.
    /// API keys only grant read access to publicly shared documents.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Service account key (JSON) reserved for server-to-server access.
    #[serde(default)]
    pub service_account_key: Option<String>,
    /// Base URL of the Sheets REST API (overridable for proxies and tests)
    #[serde(default = "default_google_api_base_url")]
    pub api_base_url: String,
    /// Per-call timeout applied by the HTTP client
    #[serde(default = "default_google_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// How written values are interpreted: "USER_ENTERED" or "RAW"
    #[serde(default = "default_value_input_option")]
    pub value_input_option: String,
    /// How read values are rendered: "FORMATTED_VALUE", "UNFORMATTED_VALUE" or "FORMULA"
    #[serde(default = "default_value_render_option")]
    pub value_render_option: String,
}

impl Default for GoogleSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            service_account_key: None,
            api_base_url: default_google_api_base_url(),
            request_timeout_secs: default_google_request_timeout_secs(),
            value_input_option: default_value_input_option(),
            value_render_option: default_value_render_option(),
        }
    }
}

// Keys must never end up in logs.
impl std::fmt::Debug for GoogleSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field(
                "service_account_key",
                &self.service_account_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("value_input_option", &self.value_input_option)
            .field("value_render_option", &self.value_render_option)
            .finish()
    }
}

/// Request limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsSettings {
    /// Page size used when a listing request omits `limit` (default: 100)
    #[serde(default = "default_page_limit")]
    pub default_page_limit: usize,
    /// Largest accepted `limit` (default and hard ceiling: 1000)
    #[serde(default = "default_max_page_limit")]
    pub max_page_limit: usize,
    /// Maximum JSON request body size in bytes (default: 2MB)
    #[serde(default = "default_max_request_body_size")]
    pub max_request_body_size: usize,
}

impl Default for LimitsSettings {
    fn default() -> Self {
        Self {
            default_page_limit: default_page_limit(),
            max_page_limit: default_max_page_limit(),
            max_request_body_size: default_max_request_body_size(),
        }
    }
}

/// Performance settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceSettings {
    /// HTTP keep-alive in seconds (default: 75)
    #[serde(default = "default_keepalive_timeout")]
    pub keepalive_timeout: u64,
    /// Time allowed for a client to send request headers, in seconds (default: 5)
    #[serde(default = "default_client_request_timeout")]
    pub client_request_timeout: u64,
    /// Time allowed for graceful connection shutdown, in seconds (default: 2)
    #[serde(default = "default_client_disconnect_timeout")]
    pub client_disconnect_timeout: u64,
    /// Per-worker max concurrent connections (default: 25000)
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

impl Default for PerformanceSettings {
    fn default() -> Self {
        Self {
            keepalive_timeout: default_keepalive_timeout(),
            client_request_timeout: default_client_request_timeout(),
            client_disconnect_timeout: default_client_disconnect_timeout(),
            max_connections: default_max_connections(),
        }
    }
}

/// CORS configuration that maps directly to actix-cors options
/// See: https://docs.rs/actix-cors/latest/actix_cors/struct.Cors.html
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins. Use ["*"] for any origin, or specify exact origins.
    /// Empty list = same as ["*"] (allow any origin)
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Allowed HTTP methods. Default: ["GET", "POST", "PUT", "OPTIONS"]
    #[serde(default = "default_cors_methods")]
    pub allowed_methods: Vec<String>,

    /// Allowed HTTP headers. Use ["*"] for any header.
    #[serde(default = "default_cors_headers")]
    pub allowed_headers: Vec<String>,

    /// Headers to expose to the browser. Default: []
    #[serde(default)]
    pub expose_headers: Vec<String>,

    /// Allow credentials (cookies, authorization headers). Default: true
    #[serde(default = "default_true")]
    pub allow_credentials: bool,

    /// Preflight cache max age in seconds. Default: 3600 (1 hour)
    #[serde(default = "default_cors_max_age")]
    pub max_age: u64,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(), // Empty = allow any
            allowed_methods: default_cors_methods(),
            allowed_headers: default_cors_headers(),
            expose_headers: Vec::new(),
            allow_credentials: true,
            max_age: default_cors_max_age(),
        }
    }
}

/// Security settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecuritySettings {
    #[serde(default)]
    pub cors: CorsSettings,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            server: ServerSettings::default(),
            logging: LoggingSettings::default(),
            google: GoogleSettings::default(),
            limits: LimitsSettings::default(),
            performance: PerformanceSettings::default(),
            security: SecuritySettings::default(),
        }
    }
}
