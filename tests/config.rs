use clap::Parser;
use startwise::cli::Args;
use startwise::config::{
    normalize_gemini_endpoint, Config, FileConfig, DEFAULT_GEMINI_ENDPOINT, DEFAULT_MODEL,
    DEFAULT_PAYMENT_ENDPOINT, DEFAULT_SYSTEM_PROMPT,
};
use std::collections::HashMap;
use std::path::Path;

fn resolve(argv: &[&str], file_config: FileConfig, env: &[(&str, &str)]) -> Config {
    let args = Args::parse_from(argv);
    let env: HashMap<String, String> = env
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_sources(&args, file_config, |key| env.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = resolve(&["startwise", "chat", "hi"], FileConfig::default(), &[]);

    assert_eq!(config.gemini_endpoint, DEFAULT_GEMINI_ENDPOINT);
    assert_eq!(config.model, DEFAULT_MODEL);
    assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);
    assert_eq!(config.max_output_tokens, 100000);
    assert_eq!(config.temperature, 1.0);
    assert_eq!(config.payment_endpoint, DEFAULT_PAYMENT_ENDPOINT);
    assert_eq!(config.request_timeout, 60);
    assert!(!config.verbose);
    assert!(config.user_id.is_none());
    assert!(config.require_gemini_key().is_err());
    assert!(config.require_payment_key().is_err());
}

#[test]
fn test_precedence() {
    let file_config = FileConfig::parse(
        Path::new(".startwise.yaml"),
        r#"
api:
  endpoint: http://file.example/v1
  request_timeout: 5
model:
  default_model: file-model
  temperature: 0.2
session:
  user_id: file-user
"#,
    )
    .unwrap();

    let config = resolve(
        &["startwise", "chat", "-m", "cli-model", "hi"],
        file_config,
        &[
            ("STARTWISE_MODEL", "env-model"),
            ("STARTWISE_REQUEST_TIMEOUT", "30"),
            ("STARTWISE_TEMPERATURE", "not a number"),
            ("GEMINI_API_KEY", "g-key"),
            ("NKWA_API_KEY", "   "),
        ],
    );

    assert_eq!(config.model, "cli-model");
    assert_eq!(config.gemini_endpoint, "http://file.example/v1");
    assert_eq!(config.request_timeout, 30);
    assert_eq!(config.temperature, 0.2);
    assert_eq!(config.user_id.as_deref(), Some("file-user"));
    assert_eq!(config.require_gemini_key().unwrap(), "g-key");
    assert!(config.require_payment_key().is_err());
}

#[test]
fn test_model_flag_only_applies_to_chat() {
    let config = resolve(
        &["startwise", "--api-endpoint", "http://localhost:8080", "ledger"],
        FileConfig::default(),
        &[("STARTWISE_MODEL", "env-model"), ("STARTWISE_VERBOSE", "yes")],
    );

    assert_eq!(config.model, "env-model");
    assert_eq!(config.gemini_endpoint, "http://localhost:8080/v1beta");
    assert!(config.verbose);
}

#[test]
fn test_json_config_file() {
    let file_config = FileConfig::parse(
        Path::new(".startwise.json"),
        r#"{ "payment": { "endpoint": "http://pay.local/collect" } }"#,
    )
    .unwrap();
    assert_eq!(
        file_config.payment.endpoint.as_deref(),
        Some("http://pay.local/collect")
    );

    assert!(FileConfig::parse(Path::new(".startwise.yml"), "api: [").is_err());
}

#[test]
fn test_normalize_gemini_endpoint() {
    assert_eq!(
        normalize_gemini_endpoint("https://generativelanguage.googleapis.com"),
        "https://generativelanguage.googleapis.com/v1beta"
    );
    assert_eq!(
        normalize_gemini_endpoint("https://generativelanguage.googleapis.com/v1beta/"),
        "https://generativelanguage.googleapis.com/v1beta"
    );
    assert_eq!(normalize_gemini_endpoint("http://proxy/v1"), "http://proxy/v1");
    assert_eq!(
        normalize_gemini_endpoint("http://proxy/videos"),
        "http://proxy/videos/v1beta"
    );
}
