use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Identity string reported in every success envelope.
pub const DEFAULT_OFFICIAL_EMAIL: &str = "nitasha1917.be23@chitkara.edu.in";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct BfhlConfig {
    pub common: core_config::Config,
    pub official_email: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    /// Absent means every AI request fails with a configuration error.
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub api_base: String,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
        }
    }
}

impl Default for BfhlConfig {
    fn default() -> Self {
        Self {
            common: core_config::Config::default(),
            official_email: DEFAULT_OFFICIAL_EMAIL.to_string(),
            log_level: "info".to_string(),
            otlp_endpoint: None,
            gemini: GeminiSettings::default(),
        }
    }
}

impl BfhlConfig {
    /// Resolve the process-wide settings once at startup.
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        Ok(BfhlConfig {
            common,
            official_email: get_env("OFFICIAL_EMAIL", DEFAULT_OFFICIAL_EMAIL),
            log_level: get_env("LOG_LEVEL", "info"),
            otlp_endpoint: get_optional_env("OTLP_ENDPOINT"),
            gemini: GeminiSettings {
                api_key: get_optional_env("GEMINI_API_KEY").map(Secret::new),
                model: get_env("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
                api_base: get_env("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
            },
        })
    }
}

fn get_env(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

fn get_optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|val| !val.trim().is_empty())
}
