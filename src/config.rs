use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub asr: AsrConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// Settings for one recognition session. Credentials are expected from the
/// environment (RELAY__ASR__APP_ID etc.) rather than the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct AsrConfig {
    /// Vendor WebSocket endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default)]
    pub app_id: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default)]
    pub api_secret: String,

    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default = "default_domain")]
    pub domain: String,

    #[serde(default = "default_accent")]
    pub accent: String,

    /// End-of-speech silence threshold in milliseconds
    #[serde(default = "default_vad_eos")]
    pub vad_eos: u32,

    /// Punctuate-the-text flag
    #[serde(default = "default_ptt")]
    pub ptt: u8,

    /// Partial-result correction mode ("wpgs" enables replace fragments)
    #[serde(default = "default_dwa")]
    pub dwa: String,

    /// Bound on one session attempt, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AsrConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            app_id: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            language: default_language(),
            domain: default_domain(),
            accent: default_accent(),
            vad_eos: default_vad_eos(),
            ptt: default_ptt(),
            dwa: default_dwa(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String {
    "wss://iat-api.xfyun.cn/v2/iat".to_string()
}

fn default_language() -> String {
    "zh_cn".to_string()
}

fn default_domain() -> String {
    "iat".to_string()
}

fn default_accent() -> String {
    "mandarin".to_string()
}

fn default_vad_eos() -> u32 {
    2000
}

fn default_ptt() -> u8 {
    1
}

fn default_dwa() -> String {
    "wpgs".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            // Environment overrides, e.g. RELAY__ASR__API_KEY
            .add_source(config::Environment::with_prefix("RELAY").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
