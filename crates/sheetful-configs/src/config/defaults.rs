// Default value functions

/// Hard ceiling for the `limit` pagination parameter.
pub const PAGE_LIMIT_CEILING: usize = 1000;

pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_port() -> u16 {
    8000
}

pub fn default_workers() -> usize {
    0
}

pub fn default_true() -> bool {
    true
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_logs_path() -> String {
    "./logs".to_string()
}

pub fn default_log_format() -> String {
    "compact".to_string()
}

pub fn default_google_api_base_url() -> String {
    "https://sheets.googleapis.com".to_string()
}

pub fn default_google_request_timeout_secs() -> u64 {
    30
}

pub fn default_value_input_option() -> String {
    "USER_ENTERED".to_string()
}

pub fn default_value_render_option() -> String {
    "FORMATTED_VALUE".to_string()
}

pub fn default_page_limit() -> usize {
    100
}

pub fn default_max_page_limit() -> usize {
    PAGE_LIMIT_CEILING
}

pub fn default_max_request_body_size() -> usize {
    2 * 1024 * 1024 // 2MB
}

pub fn default_keepalive_timeout() -> u64 {
    75
}

pub fn default_client_request_timeout() -> u64 {
    5
}

pub fn default_client_disconnect_timeout() -> u64 {
    2
}

pub fn default_max_connections() -> usize {
    25000
}

pub fn default_cors_methods() -> Vec<String> {
    vec![
        "GET".to_string(),
        "POST".to_string(),
        "PUT".to_string(),
        "OPTIONS".to_string(),
    ]
}

pub fn default_cors_headers() -> Vec<String> {
    vec![
        "Authorization".to_string(),
        "Content-Type".to_string(),
        "Accept".to_string(),
        "Origin".to_string(),
        "X-Requested-With".to_string(),
        "X-Google-Access-Token".to_string(),
    ]
}

pub fn default_cors_max_age() -> u64 {
    3600 // 1 hour
}
