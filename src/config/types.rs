use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::logging::LoggingConfig;
use super::store::StoreConfig;

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: backend endpoint, credential store, logging.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct ConfigV1 {
    pub api: ApiConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the remittance backend lives and how long we wait for it.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct ApiConfig {
    /// Origin of the backend, e.g. "https://payroll.example.com/api".
    pub base_url: String,
    #[serde(default = "default_timeout_in_ms")]
    pub timeout_in_ms: u64,
}

fn default_timeout_in_ms() -> u64 {
    30_000
}

/// Load config from a YAML file, with `REMITDESK_*` environment variables
/// layered on top (e.g. `REMITDESK_API__BASE_URL`).
pub fn load_config(path: &Path) -> ConfigV1 {
    let figment = Figment::new()
        .merge(Yaml::file(path))
        .merge(Env::prefixed("REMITDESK_").split("__"));
    let config = match figment.extract::<Config>() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };
    match config {
        Config::ConfigV1(c) => c,
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema).unwrap());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreBackend;

    const SAMPLE: &str = r#"
version: "1.0.0"
api:
  base_url: "https://payroll.example.com/api"
store:
  backend:
    type: file
    path: "/tmp/remitdesk-credentials.json"
logging:
  level: "debug"
  format: "json"
"#;

    #[test]
    fn sample_config_parses() {
        let config: Config = Figment::new()
            .merge(Yaml::string(SAMPLE))
            .extract()
            .expect("sample config should parse");
        let Config::ConfigV1(config) = config;
        assert_eq!(config.api.base_url, "https://payroll.example.com/api");
        assert_eq!(config.api.timeout_in_ms, 30_000);
        assert!(matches!(config.store.backend, StoreBackend::File(_)));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn store_and_logging_sections_are_optional() {
        let minimal = r#"
version: "1.0.0"
api:
  base_url: "http://localhost:8080"
"#;
        let config: Config = Figment::new()
            .merge(Yaml::string(minimal))
            .extract()
            .expect("minimal config should parse");
        let Config::ConfigV1(config) = config;
        assert!(matches!(config.store.backend, StoreBackend::Memory));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "console");
    }
}
