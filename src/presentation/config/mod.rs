mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ArchiveBackendSetting, ArchiveSettings, ConfigError, GroundingSettings, PipelineSettings,
    ProviderSettings, ServerSettings, Settings,
};
