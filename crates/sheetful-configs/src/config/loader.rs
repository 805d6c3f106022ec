use super::defaults::PAGE_LIMIT_CEILING;
use super::types::ServerConfig;
use std::fs;
use std::path::Path;

const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

impl ServerConfig {
    /// Load configuration from a TOML file
    ///
    /// Note: Environment overrides are applied separately via `apply_env_overrides()`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text without touching the environment.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let mut config: ServerConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;

        config.normalize();

        Ok(config)
    }

    /// Load `path` when it exists, otherwise start from defaults, then apply
    /// environment overrides and validate.
    ///
    /// Returns the config and whether the file was found.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> anyhow::Result<(Self, bool)> {
        let path = path.as_ref();
        let (mut config, found) = if path.exists() {
            (Self::from_file(path)?, true)
        } else {
            (Self::default(), false)
        };

        config.apply_env_overrides()?;
        config.finalize()?;

        Ok((config, found))
    }

    /// Override configuration with environment variables.
    ///
    /// Supported variables:
    /// - SHEETFUL_SERVER_HOST (legacy: HOST)
    /// - SHEETFUL_SERVER_PORT (legacy: PORT)
    /// - SHEETFUL_LOG_LEVEL (legacy: LOG_LEVEL)
    /// - SHEETFUL_LOGS_PATH
    /// - SHEETFUL_LOG_TO_CONSOLE
    /// - GOOGLE_API_KEY
    /// - GOOGLE_SERVICE_ACCOUNT_KEY
    pub fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        self.apply_overrides_from(|name| std::env::var(name).ok())
    }

    /// Same as `apply_env_overrides` with an arbitrary variable source.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // First non-empty value wins
        let first = |names: &[&str]| -> Option<(String, String)> {
            names.iter().find_map(|name| {
                lookup(*name)
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| (name.to_string(), v))
            })
        };

        if let Some((_, host)) = first(&["SHEETFUL_SERVER_HOST", "HOST"]) {
            self.server.host = host;
        }

        if let Some((name, port_str)) = first(&["SHEETFUL_SERVER_PORT", "PORT"]) {
            self.server.port = port_str
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid {} value: {}", name, port_str))?;
        }

        if let Some((_, level)) = first(&["SHEETFUL_LOG_LEVEL", "LOG_LEVEL"]) {
            // LOG_LEVEL=INFO is common in container setups
            self.logging.level = level.trim().to_lowercase();
        }

        if let Some((_, path)) = first(&["SHEETFUL_LOGS_PATH"]) {
            self.logging.logs_path = path;
        }

        if let Some((_, val)) = first(&["SHEETFUL_LOG_TO_CONSOLE"]) {
            let val = val.to_lowercase();
            self.logging.log_to_console = val == "true" || val == "1" || val == "yes";
        }

        if let Some((_, key)) = first(&["GOOGLE_API_KEY"]) {
            self.google.api_key = Some(key);
        }

        if let Some((_, key)) = first(&["GOOGLE_SERVICE_ACCOUNT_KEY"]) {
            self.google.service_account_key = Some(key);
        }

        Ok(())
    }

    fn normalize(&mut self) {
        self.logging.level = self.logging.level.trim().to_lowercase();
        self.logging.format = self.logging.format.trim().to_lowercase();
        if self.google.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            self.google.api_key = None;
        }
        let trimmed = self.google.api_base_url.trim_end_matches('/').len();
        self.google.api_base_url.truncate(trimmed);
    }

    /// Normalize values and validate configuration.
    ///
    /// Call this after applying environment overrides.
    pub fn finalize(&mut self) -> anyhow::Result<()> {
        self.normalize();
        self.validate()?;
        Ok(())
    }

    /// Validate configuration settings
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        if self.server.host.trim().is_empty() {
            return Err(anyhow::anyhow!("Server host cannot be empty"));
        }

        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                VALID_LOG_LEVELS.join(", ")
            ));
        }

        let valid_formats = ["compact", "pretty", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_formats.join(", ")
            ));
        }

        for (target, level) in &self.logging.targets {
            if !VALID_LOG_LEVELS.contains(&level.as_str()) {
                return Err(anyhow::anyhow!(
                    "Invalid log level '{}' for target '{}'. Must be one of: {}",
                    level,
                    target,
                    VALID_LOG_LEVELS.join(", ")
                ));
            }
        }

        if self.limits.max_page_limit == 0 || self.limits.max_page_limit > PAGE_LIMIT_CEILING {
            return Err(anyhow::anyhow!(
                "max_page_limit must be between 1 and {}",
                PAGE_LIMIT_CEILING
            ));
        }

        if self.limits.default_page_limit == 0 {
            return Err(anyhow::anyhow!("default_page_limit cannot be 0"));
        }

        if self.limits.default_page_limit > self.limits.max_page_limit {
            return Err(anyhow::anyhow!(
                "default_page_limit ({}) cannot exceed max_page_limit ({})",
                self.limits.default_page_limit,
                self.limits.max_page_limit
            ));
        }

        if self.limits.max_request_body_size == 0 {
            return Err(anyhow::anyhow!("max_request_body_size cannot be 0"));
        }

        if self.google.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!("google.request_timeout_secs cannot be 0"));
        }

        if !self.google.api_base_url.starts_with("http://")
            && !self.google.api_base_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "google.api_base_url must be an http(s) URL, got '{}'",
                self.google.api_base_url
            ));
        }

        let valid_input = ["USER_ENTERED", "RAW"];
        if !valid_input.contains(&self.google.value_input_option.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid value_input_option '{}'. Must be one of: {}",
                self.google.value_input_option,
                valid_input.join(", ")
            ));
        }

        let valid_render = ["FORMATTED_VALUE", "UNFORMATTED_VALUE", "FORMULA"];
        if !valid_render.contains(&self.google.value_render_option.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid value_render_option '{}'. Must be one of: {}",
                self.google.value_render_option,
                valid_render.join(", ")
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn apply(config: &mut ServerConfig, pairs: &[(&str, &str)]) -> anyhow::Result<()> {
        let env = vars(pairs);
        config.apply_overrides_from(|name| env.get(name).cloned())
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.limits.default_page_limit, 100);
        assert_eq!(config.limits.max_page_limit, 1000);
    }

    #[test]
    fn test_invalid_port() {
        let mut config = ServerConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = ServerConfig::default();
        config.logging.level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_page_limit_above_ceiling_rejected() {
        let mut config = ServerConfig::default();
        config.limits.max_page_limit = 5000;
        assert!(config.validate().is_err());

        config.limits.max_page_limit = 50;
        assert!(config.validate().is_err(), "default above max must be rejected");
    }

    #[test]
    fn test_invalid_render_option() {
        let mut config = ServerConfig::default();
        config.google.value_render_option = "PRETTY".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_override_server_host_and_port() {
        let mut config = ServerConfig::default();
        apply(&mut config, &[("SHEETFUL_SERVER_HOST", "127.0.0.1"), ("SHEETFUL_SERVER_PORT", "9090")])
            .unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn test_env_override_legacy_names() {
        let mut config = ServerConfig::default();
        apply(&mut config, &[("HOST", "localhost"), ("PORT", "8081"), ("LOG_LEVEL", "DEBUG")])
            .unwrap();
        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_env_override_prefers_new_names() {
        let mut config = ServerConfig::default();
        apply(&mut config, &[("SHEETFUL_SERVER_PORT", "9000"), ("PORT", "8081")]).unwrap();
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_env_override_invalid_port() {
        let mut config = ServerConfig::default();
        let err = apply(&mut config, &[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_env_override_log_to_console() {
        let mut config = ServerConfig::default();
        apply(&mut config, &[("SHEETFUL_LOG_TO_CONSOLE", "no")]).unwrap();
        assert!(!config.logging.log_to_console);

        apply(&mut config, &[("SHEETFUL_LOG_TO_CONSOLE", "YES")]).unwrap();
        assert!(config.logging.log_to_console);
    }

    #[test]
    fn test_env_override_google_keys() {
        let mut config = ServerConfig::default();
        apply(
            &mut config,
            &[("GOOGLE_API_KEY", "key-123"), ("GOOGLE_SERVICE_ACCOUNT_KEY", "{}")],
        )
        .unwrap();
        assert_eq!(config.google.api_key.as_deref(), Some("key-123"));
        assert_eq!(config.google.service_account_key.as_deref(), Some("{}"));
    }

    #[test]
    fn test_empty_env_value_is_ignored() {
        let mut config = ServerConfig::default();
        apply(&mut config, &[("GOOGLE_API_KEY", "  ")]).unwrap();
        assert!(config.google.api_key.is_none());
    }

    #[test]
    fn test_debug_redacts_keys() {
        let mut config = ServerConfig::default();
        config.google.api_key = Some("super-secret".to_string());
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn test_from_file_with_partial_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8123

[logging]
level = "WARN"

[logging.targets]
sheetful_gateway = "debug"

[google]
value_render_option = "UNFORMATTED_VALUE"
"#
        )
        .unwrap();

        let mut config = ServerConfig::from_file(file.path()).unwrap();
        config.finalize().unwrap();

        assert_eq!(config.server.port, 8123);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.targets.get("sheetful_gateway").map(String::as_str), Some("debug"));
        assert_eq!(config.google.value_render_option, "UNFORMATTED_VALUE");
        assert_eq!(config.google.value_input_option, "USER_ENTERED");
        assert_eq!(config.limits.max_page_limit, 1000);
    }

    #[test]
    fn test_from_file_rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();
        let err = ServerConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let (config, found) = ServerConfig::load_or_default(dir.path().join("missing.toml")).unwrap();
        assert!(!found);
        assert!(config.validate().is_ok());
    }
}
