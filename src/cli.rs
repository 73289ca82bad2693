use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use crate::config::{Api, Config, Filter};

#[derive(Parser, Serialize, Debug)]
#[command(about = "Find visually similar products for an image")]
pub(crate) struct CliArgs {
    /// Local image file to search with
    #[arg(short, long, env = "VPM_FILE", conflicts_with = "url")]
    #[serde(skip_serializing)]
    pub(crate) file: Option<PathBuf>,

    /// Remote image URL to search with
    #[arg(short, long, env = "VPM_URL")]
    #[serde(skip_serializing)]
    pub(crate) url: Option<String>,

    /// Only keep products scoring strictly above this similarity
    #[arg(short, long, env = "VPM_MIN_SIMILARITY")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) min_similarity: Option<f32>,

    /// Search API base URL (default: "http://localhost:5001")
    #[arg(long, env = "VPM_API_URL")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) api_url: Option<String>,

    /// Request timeout in sec (default: 30)
    #[arg(long, env = "VPM_TIMEOUT")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) timeout: Option<u64>,

    /// Config file path (default: "config.toml")
    #[arg(short, long, env = "VPM_CONFIG")]
    #[serde(skip_serializing)]
    pub(crate) config: Option<String>,
}

impl CliArgs {
    pub fn as_config(self) -> Config {
        Config {
            api: Api {
                base_url: self.api_url,
                timeout: self.timeout,
            },
            filter: Filter {
                min_similarity: self.min_similarity,
            },
        }
    }
}
