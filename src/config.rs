use serde::Deserialize;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    pub gemini_api_key: Option<String>,

    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,

    #[serde(default = "default_model_timeout")]
    pub model_timeout: u64,

    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: u64,

    #[serde(default = "default_user_agent")]
    pub fetch_user_agent: String,

    #[serde(default)]
    pub allow_private_hosts: bool,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    #[serde(default)]
    pub log_json: bool,
}

fn default_api_port() -> u16 { 3000 }
fn default_gemini_model() -> String { "gemini-1.5-pro".to_string() }
fn default_gemini_base_url() -> String { "https://generativelanguage.googleapis.com/v1beta".to_string() }
fn default_model_timeout() -> u64 { 30 }
fn default_fetch_timeout() -> u64 { 30 }
fn default_user_agent() -> String { DEFAULT_USER_AGENT.to_string() }
fn default_max_body_bytes() -> usize { 5 * 1024 * 1024 }

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            api_port: std::env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_api_port),
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| default_gemini_model()),
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| default_gemini_base_url()),
            model_timeout: std::env::var("MODEL_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_model_timeout),
            fetch_timeout: std::env::var("FETCH_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_fetch_timeout),
            fetch_user_agent: std::env::var("FETCH_USER_AGENT")
                .unwrap_or_else(|_| default_user_agent()),
            allow_private_hosts: std::env::var("ALLOW_PRIVATE_HOSTS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_max_body_bytes),
            log_json: std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        };

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_port: default_api_port(),
            gemini_api_key: None,
            gemini_model: default_gemini_model(),
            gemini_base_url: default_gemini_base_url(),
            model_timeout: default_model_timeout(),
            fetch_timeout: default_fetch_timeout(),
            fetch_user_agent: default_user_agent(),
            allow_private_hosts: false,
            max_body_bytes: default_max_body_bytes(),
            log_json: false,
        }
    }
}
