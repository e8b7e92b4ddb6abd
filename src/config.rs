use http::StatusCode;
use serde::{de, Deserialize, Deserializer};

use crate::error::ConfigError;

const DEFAULT_SCHEME: &str = "http";
const DEFAULT_HOST: &str = "localhost:8080";

/// Application configuration.
///
/// Scheme and host are used to build absolute URLs for named routes. The redirect status is
/// used by redirects built by the [`App`](crate::App).
///
/// Every field is optional when deserializing; missing fields take their default.
///
/// ```
/// use waymark::AppConfig;
///
/// let config = AppConfig::from_json(r#"{ "scheme": "https", "host": "example.com" }"#).unwrap();
/// assert_eq!(config.host(), "example.com");
/// assert_eq!(config.redirect_status().as_u16(), 303);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    scheme: String,
    host: String,
    #[serde(deserialize_with = "deserialize_redirect_status")]
    redirect_status: StatusCode,
}

impl AppConfig {
    /// Parses configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config = serde_json::from_str::<AppConfig>(json).map_err(ConfigError::Json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.scheme.as_str(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme {
                scheme: self.scheme.clone(),
            });
        }

        if self.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }

        Ok(())
    }

    /// Sets the scheme, `http` or `https`.
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Result<Self, ConfigError> {
        self.scheme = scheme.into();
        self.validate()?;
        Ok(self)
    }

    /// Sets the host, with an optional port.
    pub fn with_host(mut self, host: impl Into<String>) -> Result<Self, ConfigError> {
        self.host = host.into();
        self.validate()?;
        Ok(self)
    }

    /// Sets the status used by redirects.
    pub fn with_redirect_status(mut self, status: StatusCode) -> Self {
        self.redirect_status = status;
        self
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Server host name.
    ///
    /// By default host name is set to a "localhost:8080" value.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Status used by redirects; "303 See Other" by default.
    pub fn redirect_status(&self) -> StatusCode {
        self.redirect_status
    }

    /// Returns `scheme://host`.
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            scheme: DEFAULT_SCHEME.to_owned(),
            host: DEFAULT_HOST.to_owned(),
            redirect_status: StatusCode::SEE_OTHER,
        }
    }
}

fn deserialize_redirect_status<'de, D>(deserializer: D) -> Result<StatusCode, D::Error>
where
    D: Deserializer<'de>,
{
    let code = u16::deserialize(deserializer)?;

    match StatusCode::from_u16(code) {
        Ok(status) if status.is_redirection() => Ok(status),
        _ => Err(de::Error::invalid_value(
            de::Unexpected::Unsigned(code.into()),
            &"a 3xx status code",
        )),
    }
}
