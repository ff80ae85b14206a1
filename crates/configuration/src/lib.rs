use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    Config, DashboardSettings, GeneratorSettings, LoggingSettings, Placeholders, RegionShares,
    SeriesProfile, ServerSettings,
};

/// Loads the application configuration.
///
/// Sources are layered over the built-in defaults: the file at `path` (which
/// must exist), or else an optional `config.toml` in the working directory,
/// followed by `PULSE__SECTION__KEY` environment variables. The merged result
/// is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::new("config.toml", config::FileFormat::Toml).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix("PULSE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(
        days = config.generator.days,
        seed = config.generator.seed,
        "Configuration loaded."
    );

    Ok(config)
}
