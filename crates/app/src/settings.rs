///! Settings for the binary. Read from `config/financore.toml`, the
///! `FINANCORE_*` environment, then the command-line overrides, in that
///! order.
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/financore.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// Session file path; `None` leaves the client's default in place.
    pub session_path: Option<String>,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: client::DEFAULT_BASE_URL.to_string(),
            session_path: None,
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct Overrides {
    /// Optional config file path (TOML).
    #[arg(long)]
    pub config: Option<String>,
    /// Override the API base URL.
    #[arg(long)]
    pub base_url: Option<String>,
    /// Override the session file path.
    #[arg(long)]
    pub session_path: Option<String>,
    /// Override the log level.
    #[arg(long)]
    pub level: Option<String>,
}

pub fn load(overrides: &Overrides) -> Result<AppConfig, config::ConfigError> {
    let config_path = overrides.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("FINANCORE"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = &overrides.base_url {
        settings.base_url = base_url.clone();
    }
    if let Some(session_path) = &overrides.session_path {
        settings.session_path = Some(session_path.clone());
    }
    if let Some(level) = &overrides.level {
        settings.level = level.clone();
    }

    Ok(settings)
}
