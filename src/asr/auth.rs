use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::Url;

use super::error::AsrError;
use crate::config::AsrConfig;

type HmacSha256 = Hmac<Sha256>;

/// Credentials for the recognition service, validated once per request.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub app_id: String,
    pub api_key: String,
    api_secret: String,
}

impl Credentials {
    pub fn from_config(config: &AsrConfig) -> Result<Self, AsrError> {
        let required = [
            ("app_id", &config.app_id),
            ("api_key", &config.api_key),
            ("api_secret", &config.api_secret),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(AsrError::AuthenticationConfigMissing(name));
            }
        }

        Ok(Self {
            app_id: config.app_id.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        })
    }
}

/// Build the signed connection URL for one attempt.
///
/// The signature covers the host, the current RFC-1123 date, and the request
/// line, so the URL expires quickly; a retry must call this again.
pub fn signed_url(endpoint: &str, credentials: &Credentials) -> Result<String, AsrError> {
    let date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
    signed_url_at(endpoint, credentials, &date)
}

fn signed_url_at(endpoint: &str, credentials: &Credentials, date: &str) -> Result<String, AsrError> {
    let mut url = Url::parse(endpoint)
        .map_err(|e| AsrError::ConnectionError(format!("invalid endpoint {endpoint}: {e}")))?;
    let host = url
        .host_str()
        .ok_or_else(|| AsrError::ConnectionError(format!("endpoint {endpoint} has no host")))?
        .to_string();

    let canonical = format!("host: {host}\ndate: {date}\nGET {} HTTP/1.1", url.path());

    let mut mac = HmacSha256::new_from_slice(credentials.api_secret.as_bytes())
        .map_err(|e| AsrError::ConnectionError(format!("failed to initialize signer: {e}")))?;
    mac.update(canonical.as_bytes());
    let signature = base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes());

    let authorization_origin = format!(
        "api_key=\"{}\", algorithm=\"hmac-sha256\", headers=\"host date request-line\", signature=\"{}\"",
        credentials.api_key, signature
    );
    let authorization =
        base64::engine::general_purpose::STANDARD.encode(authorization_origin.as_bytes());

    url.query_pairs_mut()
        .append_pair("host", &host)
        .append_pair("date", date)
        .append_pair("authorization", &authorization);

    Ok(url.into())
}
