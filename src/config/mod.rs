mod api;
mod defaults;

use crate::cli::Args;
use crate::error::{Error, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

pub use api::{normalize_gemini_endpoint, ApiConfig, PaymentConfig};
pub use defaults::{
    default_max_output_tokens, default_request_timeout, default_temperature,
    DEFAULT_GEMINI_ENDPOINT, DEFAULT_MODEL, DEFAULT_PAYMENT_ENDPOINT, DEFAULT_SYSTEM_PROMPT,
};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub verbose: Option<bool>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub default_model: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub max_output_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_endpoint: String,
    pub model: String,
    pub system_prompt: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub payment_api_key: Option<String>,
    pub payment_endpoint: String,
    pub request_timeout: u64,
    pub verbose: bool,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub payment: PaymentConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Result<Self> {
        let file_config = FileConfig::load()?;
        Ok(Self::from_sources(args, file_config, |key| env::var(key).ok()))
    }

    /// Resolve every setting: CLI args > env var > config file > default.
    pub fn from_sources<F>(args: &Args, file_config: FileConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let gemini_api_key = non_empty("GEMINI_API_KEY");
        let payment_api_key = non_empty("NKWA_API_KEY");

        let gemini_endpoint = args
            .api_endpoint
            .clone()
            .or_else(|| non_empty("STARTWISE_GEMINI_ENDPOINT"))
            .or(file_config.api.endpoint)
            .map(|endpoint| normalize_gemini_endpoint(&endpoint))
            .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string());

        let model = args
            .model_override()
            .map(str::to_string)
            .or_else(|| non_empty("STARTWISE_MODEL"))
            .or(file_config.model.default_model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let system_prompt = non_empty("STARTWISE_SYSTEM_PROMPT")
            .or(file_config.model.system_prompt)
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());

        let max_output_tokens = non_empty("STARTWISE_MAX_OUTPUT_TOKENS")
            .and_then(|s| s.parse::<u32>().ok())
            .or(file_config.model.max_output_tokens)
            .unwrap_or_else(default_max_output_tokens);

        let temperature = non_empty("STARTWISE_TEMPERATURE")
            .and_then(|s| s.parse::<f32>().ok())
            .or(file_config.model.temperature)
            .unwrap_or_else(default_temperature);

        let payment_endpoint = non_empty("STARTWISE_PAYMENT_ENDPOINT")
            .or(file_config.payment.endpoint)
            .unwrap_or_else(|| DEFAULT_PAYMENT_ENDPOINT.to_string());

        let request_timeout = non_empty("STARTWISE_REQUEST_TIMEOUT")
            .and_then(|s| s.parse::<u64>().ok())
            .or(file_config.api.request_timeout)
            .unwrap_or_else(default_request_timeout);

        let verbose = args.verbose
            || non_empty("STARTWISE_VERBOSE")
                .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
                .or(file_config.session.verbose)
                .unwrap_or(false);

        let user_id = non_empty("STARTWISE_USER_ID").or(file_config.session.user_id);

        Config {
            gemini_api_key,
            gemini_endpoint,
            model,
            system_prompt,
            max_output_tokens,
            temperature,
            payment_api_key,
            payment_endpoint,
            request_timeout,
            verbose,
            user_id,
        }
    }

    pub fn require_gemini_key(&self) -> Result<&str> {
        self.gemini_api_key
            .as_deref()
            .ok_or_else(|| Error::Config("GEMINI_API_KEY environment variable not set".into()))
    }

    pub fn require_payment_key(&self) -> Result<&str> {
        self.payment_api_key
            .as_deref()
            .ok_or_else(|| Error::Config("NKWA_API_KEY environment variable not set".into()))
    }
}

impl FileConfig {
    pub fn load() -> Result<Self> {
        for path in Self::get_config_paths() {
            if path.exists() {
                let contents = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                return Ok(Self::parse(&path, &contents)?);
            }
        }

        Ok(FileConfig::default())
    }

    /// YAML for `.yaml`/`.yml`, JSON otherwise.
    pub fn parse(path: &std::path::Path, contents: &str) -> anyhow::Result<Self> {
        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );

        if is_yaml {
            serde_yaml::from_str(contents)
                .with_context(|| format!("Failed to parse YAML config file: {}", path.display()))
        } else {
            serde_json::from_str(contents)
                .with_context(|| format!("Failed to parse JSON config file: {}", path.display()))
        }
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".startwise.yaml"),
            PathBuf::from(".startwise.yml"),
            PathBuf::from(".startwise.json"),
        ];

        if let Some(home_dir) = dirs::home_dir() {
            let config_dir = home_dir.join(".config").join("startwise");
            paths.push(config_dir.join("startwise.yaml"));
            paths.push(config_dir.join("startwise.yml"));
            paths.push(config_dir.join("startwise.json"));
        }

        paths
    }
}
