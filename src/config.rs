use std::time::Duration;

use figment::{
    Figment,
    providers::{Format, Json, Serialized, Toml, Yaml},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::OnceCell;

use crate::cli::CliArgs;

const DEFAULT_CONFIG_PATH: &str = "config.toml";
static CONFIG: OnceCell<Config> = OnceCell::const_new();

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct Api {
    /// Search API base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct Filter {
    /// Similarity threshold applied to result views (strict greater-than)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_similarity: Option<f32>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct Config {
    pub api: Api,
    pub filter: Filter,
}

impl Config {
    pub fn api_base_url(&self) -> &str {
        self.api.base_url.as_deref().unwrap_or("http://localhost:5001")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout.unwrap_or(30))
    }

    pub fn min_similarity(&self) -> Option<f32> {
        self.filter.min_similarity
    }
}

pub(crate) fn get_config(args: CliArgs) -> &'static Config {
    if !CONFIG.initialized() {
        let config = load_config(args);
        CONFIG.set(config).unwrap();
    }

    CONFIG.get().unwrap()
}

fn load_config(args: CliArgs) -> Config {
    let defaults = json!({
        "api": {
            "base_url": "http://localhost:5001",
            "timeout": 30,
        },
        "filter": {},
    });

    let mut figment = Figment::new().merge(Serialized::defaults(defaults));

    let config_path = std::path::PathBuf::from(
        &args
            .config
            .clone()
            .unwrap_or(DEFAULT_CONFIG_PATH.to_string()),
    );

    if config_path.exists() {
        log::info!("Config file found: {}", config_path.display());
        match config_path.extension() {
            Some(ext) => match ext.to_str() {
                Some("toml") => figment = figment.merge(Toml::file(config_path)),
                Some("json") => figment = figment.merge(Json::file(config_path)),
                Some("yaml") => figment = figment.merge(Yaml::file(config_path)),
                Some("yml") => figment = figment.merge(Yaml::file(config_path)),
                _ => {
                    log::error!("Cannot identify config file type. Must be .toml, .json or .yaml");
                    std::process::exit(1);
                }
            },
            None => {
                log::error!("Cannot identify config file type. Must be .toml, .json or .yaml");
                std::process::exit(1);
            }
        };
    } else if config_path.to_str() != Some(DEFAULT_CONFIG_PATH) {
        log::warn!("Config file not found: {}", config_path.display());
        std::process::exit(1);
    };

    let config: Config = match figment.merge(Serialized::defaults(args.as_config())).extract() {
        Ok(config) => config,
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    };

    log::debug!("Loaded config: {:#?}", config);

    config
}
