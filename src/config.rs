use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub endpoint: Option<String>,
    pub username: String,
    pub password: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        // sandbox credentials; real deployments override via config/env
        Self {
            endpoint: None,
            username: "test".to_string(),
            password: "test".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and config file.
    /// Failure here is fatal: without a reachable store there is nothing
    /// for models or forms to talk to.
    pub fn load() -> anyhow::Result<Self> {
        // Load environment variables from .env file if it exists
        dotenvy::dotenv().ok();

        let mut config = config::Config::builder();

        // Add default configuration
        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        // Add config file if it exists
        config = config.add_source(config::File::with_name("config").required(false));

        // Add environment variables with prefix "TAGFORMS"
        config = config.add_source(
            config::Environment::with_prefix("TAGFORMS")
                .separator("_")
                .prefix_separator("_"),
        );

        let config = config.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        Ok(app_config)
    }

    /// Get the store endpoint from config or environment
    pub fn store_endpoint(&self) -> anyhow::Result<String> {
        if let Some(endpoint) = &self.store.endpoint {
            return Ok(endpoint.clone());
        }

        // Fall back to environment variable
        if let Ok(url) = std::env::var("TAGSTORE_URL") {
            return Ok(url);
        }

        // Default for local development
        Ok("http://localhost:8080".to_string())
    }
}
