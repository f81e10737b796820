use serde::Deserialize;

/// Process configuration, resolved once at startup and read-only after
/// that. A missing provider credential is a fatal startup condition.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub provider: ProviderSettings,
    pub grounding: GroundingSettings,
    pub pipeline: PipelineSettings,
    pub archive: ArchiveSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroundingSettings {
    pub enabled: bool,
    pub max_terms: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineSettings {
    pub strict_retry_attempts: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveSettings {
    pub backend: ArchiveBackendSetting,
    pub local_path: String,
    pub azure_account: Option<String>,
    pub azure_access_key: Option<String>,
    pub azure_container: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveBackendSetting {
    None,
    Local,
    Azure,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = required_var("GEMINI_API_KEY")?;

        let model = optional_var("GEMINI_MODEL").unwrap_or_else(|| "gemini-2.0-flash-exp".into());
        let base_url = optional_var("GEMINI_BASE_URL");

        let port = parse_var("SERVER_PORT", 3000)?;
        let grounding_enabled = parse_var("GROUNDING_ENABLED", false)?;
        let max_terms = parse_var("GROUNDING_MAX_TERMS", 8)?;
        let strict_retry_attempts = parse_var("STRICT_RETRY_ATTEMPTS", 1)?;

        let backend = match optional_var("ARCHIVE_BACKEND").as_deref() {
            None | Some("none") => ArchiveBackendSetting::None,
            Some("local") => ArchiveBackendSetting::Local,
            Some("azure") => ArchiveBackendSetting::Azure,
            Some(other) => {
                return Err(ConfigError::InvalidValue("ARCHIVE_BACKEND", other.into()));
            }
        };

        Ok(Self {
            server: ServerSettings { port },
            provider: ProviderSettings {
                api_key,
                model,
                base_url,
            },
            grounding: GroundingSettings {
                enabled: grounding_enabled,
                max_terms,
            },
            pipeline: PipelineSettings {
                strict_retry_attempts,
            },
            archive: ArchiveSettings {
                backend,
                local_path: optional_var("ARCHIVE_LOCAL_DIR").unwrap_or_else(|| "./archive".into()),
                azure_account: optional_var("AZURE_STORAGE_ACCOUNT"),
                azure_access_key: optional_var("AZURE_STORAGE_ACCESS_KEY"),
                azure_container: optional_var("ARCHIVE_AZURE_CONTAINER"),
            },
        })
    }
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    optional_var(name).ok_or(ConfigError::MissingVar(name))
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match optional_var(name) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
    }
}
