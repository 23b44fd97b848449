use crate::connectors::UpstreamConfig;
use crate::i18n::Locale;
use serde;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub app_port: u16,
    pub app_host: String,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_port: 8000,
            app_host: "127.0.0.1".to_string(),
            locale: Locale::default(),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl Settings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.app_host, self.app_port)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let settings = config::Config::builder()
        .set_default("app_host", "127.0.0.1")?
        .set_default("app_port", 8000)?
        // configuration.yaml is optional, env vars like APP__UPSTREAM__MODEL override it
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build()?;

    let mut config: Settings = settings.try_deserialize()?;

    // The credential is never read from the file
    config.upstream.api_key = std::env::var("ANTHROPIC_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty());

    Ok(config)
}
