use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub request_timeout: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PaymentConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// Make sure a generative-content base URL carries an API version segment.
pub fn normalize_gemini_endpoint(endpoint: &str) -> String {
    let trimmed = endpoint.trim_end_matches('/');
    let has_version = trimmed
        .rsplit('/')
        .next()
        .map(|segment| segment.starts_with('v') && segment[1..].starts_with(|c: char| c.is_ascii_digit()))
        .unwrap_or(false);

    if has_version {
        trimmed.to_string()
    } else {
        format!("{}/v1beta", trimmed)
    }
}
