//! Server settings loaded via OrthoConfig.
//!
//! Every value can come from the command line, a config file or a
//! `HEROES_`-prefixed environment variable.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::middleware::ErrorDetail;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_POOL_SIZE: u32 = 10;

/// Deployment mode.
///
/// Development exposes internal error messages and stacks and allows any
/// CORS origin. Production redacts both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Local work: verbose errors, permissive CORS.
    #[default]
    Development,
    /// Deployed: redacted errors, configured origins only.
    Production,
}

impl Mode {
    /// Failure detail responses may reveal in this mode.
    #[must_use]
    pub const fn error_detail(self) -> ErrorDetail {
        match self {
            Self::Development => ErrorDetail::Verbose,
            Self::Production => ErrorDetail::Redacted,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Production => "production",
        })
    }
}

/// Error returned for an unrecognised mode string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode {0:?}; expected \"development\" or \"production\"")]
pub struct ModeParseError(String);

impl FromStr for Mode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ModeParseError(other.to_owned())),
        }
    }
}

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `HEROES_HOST` is not an IP address.
    #[error("invalid host {value:?}: {source}")]
    Host {
        /// Raw value.
        value: String,
        /// Parse failure.
        #[source]
        source: std::net::AddrParseError,
    },
    /// `HEROES_MODE` is not a known mode.
    #[error(transparent)]
    Mode(#[from] ModeParseError),
}

/// Settings for the catalogue server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HEROES")]
pub struct ServerSettings {
    /// Interface to bind, default `0.0.0.0`.
    pub host: Option<String>,
    /// Port to bind, default 5000.
    pub port: Option<u16>,
    /// PostgreSQL URL. Without it records live in memory.
    pub database_url: Option<String>,
    /// Largest number of pooled database connections.
    pub db_pool_size: Option<u32>,
    /// `development` (default) or `production`.
    pub mode: Option<String>,
    /// CORS origins honoured in production; the environment form is
    /// comma-separated.
    pub allowed_origins: Option<Vec<String>>,
    /// Replace stored records with the sample roster at startup.
    #[ortho_config(default = false)]
    pub seed: bool,
}

impl ServerSettings {
    /// Socket address to bind.
    ///
    /// # Errors
    /// Returns [`SettingsError::Host`] when the host is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let ip = match self.host.as_deref() {
            Some(raw) => raw.trim().parse().map_err(|source| SettingsError::Host {
                value: raw.to_owned(),
                source,
            })?,
            None => DEFAULT_HOST,
        };
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Configured mode, defaulting to development.
    ///
    /// # Errors
    /// Returns [`SettingsError::Mode`] for an unrecognised value.
    pub fn mode(&self) -> Result<Mode, SettingsError> {
        Ok(self
            .mode
            .as_deref()
            .map(str::parse)
            .transpose()?
            .unwrap_or_default())
    }

    /// Database URL, if one is configured and not blank.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool size, default 10.
    pub fn db_pool_size(&self) -> u32 {
        self.db_pool_size.unwrap_or(DEFAULT_POOL_SIZE)
    }

    /// Allowed CORS origins with blanks removed.
    pub fn allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .iter()
            .flatten()
            .flat_map(|entry| entry.split(','))
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "HEROES_HOST",
        "HEROES_PORT",
        "HEROES_DATABASE_URL",
        "HEROES_DB_POOL_SIZE",
        "HEROES_MODE",
        "HEROES_ALLOWED_ORIGINS",
        "HEROES_SEED",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("superhero-backend")])
            .expect("config should load")
    }

    fn env_with(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(env_with(&[]));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("bind addr"),
            SocketAddr::from(([0, 0, 0, 0], 5000))
        );
        assert_eq!(settings.mode().expect("mode"), Mode::Development);
        assert!(settings.database_url().is_none());
        assert_eq!(settings.db_pool_size(), 10);
        assert!(settings.allowed_origins().is_empty());
        assert!(!settings.seed);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(env_with(&[
            ("HEROES_HOST", "127.0.0.1"),
            ("HEROES_PORT", "8080"),
            ("HEROES_DATABASE_URL", "postgres://localhost/heroes"),
            ("HEROES_MODE", "production"),
            (
                "HEROES_ALLOWED_ORIGINS",
                "https://heroes.example, ,https://admin.example",
            ),
            ("HEROES_SEED", "true"),
        ]));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("bind addr"),
            SocketAddr::from(([127, 0, 0, 1], 8080))
        );
        assert_eq!(settings.mode().expect("mode"), Mode::Production);
        assert_eq!(
            settings.database_url(),
            Some("postgres://localhost/heroes")
        );
        assert_eq!(
            settings.allowed_origins(),
            vec!["https://heroes.example", "https://admin.example"]
        );
        assert!(settings.seed);
    }

    #[rstest]
    #[case("https://heroes.example", &["https://heroes.example"])]
    #[case(
        "https://heroes.example,https://admin.example",
        &["https://heroes.example", "https://admin.example"]
    )]
    fn origin_lists_load_from_the_environment(#[case] raw: &str, #[case] expected: &[&str]) {
        let _guard = lock_env(env_with(&[("HEROES_ALLOWED_ORIGINS", raw)]));

        let settings = load_from_empty_args();
        assert_eq!(settings.allowed_origins(), expected);
    }

    #[rstest]
    fn unknown_mode_is_reported() {
        let _guard = lock_env(env_with(&[("HEROES_MODE", "staging")]));

        let err = load_from_empty_args().mode().expect_err("mode rejected");
        assert!(err.to_string().contains("staging"));
    }

    #[rstest]
    #[case("dev", Mode::Development)]
    #[case(" Production ", Mode::Production)]
    fn mode_parsing_is_lenient(#[case] raw: &str, #[case] expected: Mode) {
        assert_eq!(raw.parse::<Mode>().expect("mode"), expected);
    }

    #[rstest]
    #[case(Mode::Development, ErrorDetail::Verbose)]
    #[case(Mode::Production, ErrorDetail::Redacted)]
    fn mode_selects_error_detail(#[case] mode: Mode, #[case] detail: ErrorDetail) {
        assert_eq!(mode.error_detail(), detail);
    }
}
