//! Runtime settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `HELIIX_*` environment variables, or a
//! configuration file, in that precedence order. Parsing of compound
//! values (socket addresses, URLs) happens in the accessors so every
//! failure carries the offending value.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use heliix::outbound::assist::AssistCredentials;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_POOL_SIZE: u32 = 10;

/// Configuration values controlling server startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HELIIX")]
pub struct Settings {
    /// PostgreSQL connection URL. Required unless fixture mode is enabled.
    pub database_url: Option<String>,
    /// Socket address to bind, e.g. `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// Opt into in-memory fixture ports when no database is configured.
    #[ortho_config(default = false)]
    pub allow_fixture: bool,
    /// Maximum connections in the database pool.
    pub db_pool_size: Option<u32>,
    /// Hosted-model bearer token.
    pub assist_api_key: Option<String>,
    /// Hosted-model API base URL.
    pub assist_base_url: Option<String>,
    /// Hosted-model identifier.
    pub assist_model: Option<String>,
}

/// Rejections raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {message}")]
    InvalidBindAddr { value: String, message: String },
    #[error("invalid assist base URL {value:?}: {message}")]
    InvalidAssistBaseUrl { value: String, message: String },
}

impl Settings {
    /// Socket address the server binds to, falling back to the default.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                message: err.to_string(),
            })
    }

    /// Database pool size, falling back to the default.
    pub fn db_pool_size(&self) -> u32 {
        self.db_pool_size.unwrap_or(DEFAULT_DB_POOL_SIZE)
    }

    /// Hosted-model credentials when all three assist settings are present.
    ///
    /// A partially configured adapter is treated as absent; the caller logs
    /// and installs the fixture source instead.
    pub fn assist_credentials(&self) -> Result<Option<AssistCredentials>, SettingsError> {
        let (Some(api_key), Some(base_url), Some(model)) = (
            self.assist_api_key.as_ref(),
            self.assist_base_url.as_ref(),
            self.assist_model.as_ref(),
        ) else {
            return Ok(None);
        };

        let base_url =
            Url::parse(base_url).map_err(|err| SettingsError::InvalidAssistBaseUrl {
                value: base_url.clone(),
                message: err.to_string(),
            })?;

        Ok(Some(AssistCredentials {
            base_url,
            api_key: api_key.clone(),
            model: model.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    fn load_from_empty_args() -> Settings {
        Settings::load_from_iter([OsString::from("heliix-backend")]).expect("config should load")
    }

    fn clear_guard() -> impl Drop {
        lock_env([
            ("HELIIX_DATABASE_URL", None::<String>),
            ("HELIIX_BIND_ADDR", None::<String>),
            ("HELIIX_ALLOW_FIXTURE", None::<String>),
            ("HELIIX_DB_POOL_SIZE", None::<String>),
            ("HELIIX_ASSIST_API_KEY", None::<String>),
            ("HELIIX_ASSIST_BASE_URL", None::<String>),
            ("HELIIX_ASSIST_MODEL", None::<String>),
        ])
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = clear_guard();

        let settings = load_from_empty_args();
        assert!(settings.database_url.is_none());
        assert!(!settings.allow_fixture);
        assert_eq!(
            settings.bind_addr().expect("default addr"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(settings.db_pool_size(), DEFAULT_DB_POOL_SIZE);
        assert!(settings.assist_credentials().expect("no error").is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "HELIIX_DATABASE_URL",
                Some("postgres://localhost/heliix".to_owned()),
            ),
            ("HELIIX_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            ("HELIIX_ALLOW_FIXTURE", Some("true".to_owned())),
            ("HELIIX_DB_POOL_SIZE", Some("4".to_owned())),
            ("HELIIX_ASSIST_API_KEY", None::<String>),
            ("HELIIX_ASSIST_BASE_URL", None::<String>),
            ("HELIIX_ASSIST_MODEL", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/heliix")
        );
        assert!(settings.allow_fixture);
        assert_eq!(
            settings.bind_addr().expect("addr"),
            "127.0.0.1:9090".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(settings.db_pool_size(), 4);
    }

    #[rstest]
    fn malformed_bind_addr_is_reported_with_the_value() {
        let _guard = clear_guard();

        let mut settings = load_from_empty_args();
        settings.bind_addr = Some("not-an-addr".to_owned());

        let err = settings.bind_addr().expect_err("bad addr");
        assert!(err.to_string().contains("not-an-addr"));
    }

    #[rstest]
    fn partial_assist_config_disables_the_adapter() {
        let _guard = clear_guard();

        let mut settings = load_from_empty_args();
        settings.assist_api_key = Some("key".to_owned());
        settings.assist_model = Some("gpt-4.1-mini".to_owned());

        assert!(settings.assist_credentials().expect("no error").is_none());
    }

    #[rstest]
    fn complete_assist_config_yields_credentials() {
        let _guard = clear_guard();

        let mut settings = load_from_empty_args();
        settings.assist_api_key = Some("key".to_owned());
        settings.assist_base_url = Some("https://api.example/v1/".to_owned());
        settings.assist_model = Some("gpt-4.1-mini".to_owned());

        let credentials = settings
            .assist_credentials()
            .expect("no error")
            .expect("credentials");
        assert_eq!(credentials.model, "gpt-4.1-mini");
        assert_eq!(credentials.base_url.as_str(), "https://api.example/v1/");
    }
}
