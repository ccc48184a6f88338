use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    /// Load configuration from file with environment variable substitution
    pub fn load() -> Result<Self> {
        let config_path =
            env::var("APP_CONFIG").unwrap_or_else(|_| "config/config.yaml".to_string());

        tracing::info!("Loading configuration from: {}", config_path);

        let config_content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path))?;

        let config_content = substitute_env_vars(&config_content)?;

        let config: Config =
            serde_yaml::from_str(&config_content).context("Failed to parse config YAML")?;

        tracing::info!("Configuration loaded successfully");
        Ok(config)
    }

    pub fn api_bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

/// Substitute environment variables in format $(VAR_NAME)
fn substitute_env_vars(content: &str) -> Result<String> {
    let mut result = content.to_string();
    let re = regex::Regex::new(r"\$\(([A-Z_]+)\)").expect("static pattern");

    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        let var_value = env::var(var_name)
            .with_context(|| format!("Environment variable {} not set", var_name))?;
        result = result.replace(&format!("$({})", var_name), &var_value);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_env_vars() {
        env::set_var("TEST_JWT_SECRET", "sekrit");

        let input = "auth:\n  jwt_secret: \"$(TEST_JWT_SECRET)\"";
        let result = substitute_env_vars(input).unwrap();

        assert_eq!(result, "auth:\n  jwt_secret: \"sekrit\"");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        let input = "auth:\n  jwt_secret: \"$(DOES_NOT_EXIST_XYZ)\"";
        assert!(substitute_env_vars(input).is_err());
    }
}
