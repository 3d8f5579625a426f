mod api;
mod defaults;
mod search;
mod validation;

use crate::app::AppSettings;
use crate::cli::Args;
use crate::models::SortOrder;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use tokio::time::Duration;

pub use api::ApiConfig;
pub use search::{LocationConfig, SearchConfig, SessionConfig};
pub use validation::{expand_env_var_in_string, parse_flag};

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout: u64,
    pub sort: SortOrder,
    pub max_distance: u32,
    pub debounce_ms: u64,
    pub location_limit: u32,
    pub verbose: bool,
    pub state_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JsonConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Result<Self, String> {
        let json_config = JsonConfig::load().unwrap_or_default();
        Self::resolve(args, json_config)
    }

    /// CLI args > env vars > config file > defaults
    pub fn resolve(args: &Args, json_config: JsonConfig) -> Result<Self, String> {
        let api_base_url = args
            .api_url
            .clone()
            .or_else(|| env::var("FETCHDOGS_API_URL").ok())
            .or(json_config.api.base_url.clone())
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(defaults::default_base_url);

        let request_timeout = env::var("FETCHDOGS_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .or(json_config.api.timeout)
            .unwrap_or_else(defaults::default_timeout);

        let sort_text = args
            .sort
            .clone()
            .or_else(|| env::var("FETCHDOGS_SORT").ok())
            .or(json_config.search.sort.clone())
            .unwrap_or_else(defaults::default_sort);
        let sort = sort_text.parse::<SortOrder>()?;

        let max_distance = env::var("FETCHDOGS_MAX_DISTANCE")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .or(json_config.search.max_distance)
            .unwrap_or_else(defaults::default_max_distance);
        if max_distance == 0 {
            return Err("Max distance must be at least 1 mile".to_string());
        }

        let debounce_ms = env::var("FETCHDOGS_DEBOUNCE_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .or(json_config.location.debounce_ms)
            .unwrap_or_else(defaults::default_debounce_ms);

        let location_limit = json_config
            .location
            .result_limit
            .filter(|limit| *limit > 0)
            .unwrap_or_else(defaults::default_result_limit);

        let verbose = args.verbose
            || env::var("FETCHDOGS_VERBOSE")
                .ok()
                .map(|v| parse_flag(&v))
                .or(json_config.session.verbose)
                .unwrap_or(false);

        let state_dir = env::var("FETCHDOGS_STATE_DIR")
            .ok()
            .or(json_config.session.state_dir.clone())
            .map(|dir| expand_env_var_in_string(&dir))
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        Ok(Config {
            api_base_url,
            request_timeout,
            sort,
            max_distance,
            debounce_ms,
            location_limit,
            verbose,
            state_dir,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            sort: self.sort,
            max_distance: self.max_distance,
            debounce: Duration::from_millis(self.debounce_ms),
            location_limit: self.location_limit,
            verbose: self.verbose,
        }
    }
}

impl JsonConfig {
    pub fn load() -> Result<Self> {
        for path in Self::get_config_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(JsonConfig::default())
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|s| s.to_str());
        let config: JsonConfig = if extension == Some("yaml") || extension == Some("yml") {
            serde_yaml::from_str(&contents).with_context(|| {
                format!("Failed to parse YAML config file: {}", path.display())
            })?
        } else {
            serde_json::from_str(&contents).with_context(|| {
                format!("Failed to parse JSON config file: {}", path.display())
            })?
        };

        Ok(config)
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".fetchdogs.yaml"),
            PathBuf::from(".fetchdogs.yml"),
            PathBuf::from(".fetchdogs.json"),
        ];

        if let Some(config_dir) = Self::user_config_dir() {
            paths.push(config_dir.join("fetchdogs.yaml"));
            paths.push(config_dir.join("fetchdogs.yml"));
            paths.push(config_dir.join("fetchdogs.json"));
        }

        paths
    }

    fn user_config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("fetchdogs"))
    }

    /// Config with every default spelled out, as written by `--config-init`.
    pub fn example() -> Self {
        JsonConfig {
            api: ApiConfig {
                base_url: Some(defaults::default_base_url()),
                timeout: Some(defaults::default_timeout()),
            },
            search: SearchConfig {
                sort: Some(defaults::default_sort()),
                max_distance: Some(defaults::default_max_distance()),
            },
            location: LocationConfig {
                debounce_ms: Some(defaults::default_debounce_ms()),
                result_limit: Some(defaults::default_result_limit()),
            },
            session: SessionConfig {
                verbose: Some(false),
                state_dir: None,
            },
        }
    }

    /// Write the example config to the user config directory. Refuses to
    /// overwrite an existing file.
    pub fn init_user_config() -> Result<PathBuf> {
        let dir = Self::user_config_dir().context("Could not determine home directory")?;
        let path = dir.join("fetchdogs.yaml");
        if path.exists() {
            anyhow::bail!("Config file already exists: {}", path.display());
        }

        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let contents = serde_yaml::to_string(&Self::example())?;
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}
