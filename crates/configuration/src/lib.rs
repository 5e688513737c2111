use crate::error::ConfigError;
use std::env;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{DatabaseSettings, LoggingSettings, ServerSettings, Settings, UploadSettings};

/// Loads the application settings from `config.toml` in the working directory.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(Path::new("config.toml"))
}

/// Loads the settings from the given file, then the environment.
///
/// The file is optional; every value has a default. Environment variables
/// prefixed `SCHOOLDIR__` override the file (`SCHOOLDIR__SERVER__PORT=8080`),
/// and `DATABASE_URL` overrides `database.url`.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("SCHOOLDIR")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("database.url", env::var("DATABASE_URL").ok())?
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}
