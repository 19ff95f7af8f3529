use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Published CSV export URL of the wine sheet.
    pub sheet_url: Option<String>,
    /// Google Sheets document id, used when `sheet_url` is not set.
    pub sheet_id: Option<String>,
    pub sheet_gid: u64,
    pub fetch_timeout_secs: u64,
    pub fetch_user_agent: String,
    pub fetch_max_retries: u32,
    pub fetch_retry_backoff_base_secs: u64,
    pub fallback_category: String,
    pub header_aliases_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("sheet_url", &self.sheet_url.as_ref().map(|_| "[redacted]"))
            .field("sheet_id", &self.sheet_id.as_ref().map(|_| "[redacted]"))
            .field("sheet_gid", &self.sheet_gid)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field("fetch_user_agent", &self.fetch_user_agent)
            .field("fetch_max_retries", &self.fetch_max_retries)
            .field(
                "fetch_retry_backoff_base_secs",
                &self.fetch_retry_backoff_base_secs,
            )
            .field("fallback_category", &self.fallback_category)
            .field("header_aliases_path", &self.header_aliases_path)
            .finish()
    }
}
