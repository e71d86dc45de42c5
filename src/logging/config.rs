use std::env;

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Custom log directory path (overrides auto-detection)
    pub custom_log_dir: Option<String>,

    /// Filter for console output
    pub console_log_level: String,

    /// Filter for the application log file (default: "debug")
    pub file_log_level: String,

    /// Write the JSON access log (default: true)
    pub access_enabled: bool,

    /// Write the JSON application log (default: true)
    pub application_enabled: bool,

    /// Requests slower than this are logged as warnings (default: 5000)
    pub slow_request_threshold_ms: u64,
}

pub const DEFAULT_CONSOLE_FILTER: &str = "pokedex_server=info,tower_http=warn";

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            custom_log_dir: None,
            console_log_level: DEFAULT_CONSOLE_FILTER.to_string(),
            file_log_level: "debug".to_string(),
            access_enabled: true,
            application_enabled: true,
            slow_request_threshold_ms: 5000,
        }
    }
}

fn flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

impl LogConfig {
    /// Load logging configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.custom_log_dir = lookup("POKEDEX_LOG_DIR").filter(|dir| !dir.trim().is_empty());

        if let Some(level) = lookup("RUST_LOG") {
            config.console_log_level = level;
        }

        if let Some(level) = lookup("POKEDEX_FILE_LOG_LEVEL") {
            config.file_log_level = level;
        }

        if let Some(val) = lookup("LOG_ACCESS_ENABLED") {
            config.access_enabled = flag(&val);
        }

        if let Some(val) = lookup("LOG_APPLICATION_ENABLED") {
            config.application_enabled = flag(&val);
        }

        if let Some(threshold) =
            lookup("LOG_SLOW_REQUEST_THRESHOLD_MS").and_then(|v| v.parse().ok())
        {
            config.slow_request_threshold_ms = threshold;
        }

        config
    }

    /// Whether any file layer is enabled
    pub fn writes_files(&self) -> bool {
        self.access_enabled || self.application_enabled
    }
}
