//! Service configuration, read from the environment.
//!
//! | Variable               | Default                  |
//! |------------------------|--------------------------|
//! | `PORT`                 | `3000`                   |
//! | `APP_ENV`              | anything but production  |
//! | `PUBLIC_URL`           | required in production   |
//! | `SLACK_BOT_TOKEN`      | none                     |
//! | `SLACK_SIGNING_SECRET` | none                     |
//! | `SLACK_API_BASE`       | `https://slack.com/api`  |
//! | `PUBLIC_DIR`           | `public`                 |

use crate::slack::{
    api::API_BASE,
    auth::{SigningSecret, SlackAccessToken},
};
use std::{env, fmt, path::PathBuf};
use url::Url;

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Local,
}

pub struct Config {
    pub port: u16,
    pub environment: Environment,
    pub public_url: Option<Url>,
    pub slack_token: Option<SlackAccessToken>,
    pub signing_secret: Option<SigningSecret>,
    pub slack_api_base: String,
    pub public_dir: PathBuf,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    InvalidPort(String),
    InvalidPublicUrl(String),
    MissingPublicUrl,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            ConfigError::InvalidPort(x) => format!("Could not parse PORT to u16: {}", x),
            ConfigError::InvalidPublicUrl(x) => format!("Could not parse PUBLIC_URL: {}", x),
            ConfigError::MissingPublicUrl => "PUBLIC_URL is required in production".into(),
        };

        write!(f, "{}", x)
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|k| env::var(k).ok())
    }

    /// Build from any source of variables. Empty values count as unset.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |k: &str| var(k).filter(|x| !x.is_empty());

        let port: u16 = match var("PORT") {
            Some(x) => x.parse().map_err(|_| ConfigError::InvalidPort(x))?,
            None => DEFAULT_PORT,
        };

        let environment = match var("APP_ENV").as_deref() {
            Some("production") => Environment::Production,
            _ => Environment::Local,
        };

        let public_url = var("PUBLIC_URL")
            .map(|x| Url::parse(&x).map_err(|_| ConfigError::InvalidPublicUrl(x)))
            .transpose()?;

        if environment == Environment::Production && public_url.is_none() {
            return Err(ConfigError::MissingPublicUrl);
        }

        Ok(Config {
            port,
            environment,
            public_url,
            slack_token: var("SLACK_BOT_TOKEN").map(SlackAccessToken),
            signing_secret: var("SLACK_SIGNING_SECRET").map(SigningSecret),
            slack_api_base: var("SLACK_API_BASE").unwrap_or_else(|| API_BASE.into()),
            public_dir: var("PUBLIC_DIR").map(PathBuf::from).unwrap_or_else(|| "public".into()),
        })
    }

    /// Where the Slack handlers fetch the calendar from: the public URL in
    /// production, otherwise this very process.
    pub fn calendar_base(&self) -> String {
        match (&self.environment, &self.public_url) {
            (Environment::Production, Some(u)) => u.as_str().trim_end_matches('/').to_owned(),
            _ => format!("http://localhost:{}", self.port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Config::from_vars(|k| vars.get(k).cloned())
    }

    #[test]
    fn test_defaults() {
        let c = config(&[]).unwrap();

        assert_eq!(c.port, 3000);
        assert_eq!(c.environment, Environment::Local);
        assert_eq!(c.slack_api_base, "https://slack.com/api");
        assert_eq!(c.public_dir, PathBuf::from("public"));
        assert!(c.signing_secret.is_none());
        assert_eq!(c.calendar_base(), "http://localhost:3000");
    }

    #[test]
    fn test_production_uses_public_url() {
        let c = config(&[
            ("APP_ENV", "production"),
            ("PUBLIC_URL", "https://calendar.example.com/"),
            ("PORT", "8080"),
        ])
        .unwrap();

        assert_eq!(c.calendar_base(), "https://calendar.example.com");
    }

    #[test]
    fn test_local_ignores_public_url() {
        let c = config(&[
            ("PUBLIC_URL", "https://calendar.example.com"),
            ("PORT", "8080"),
        ])
        .unwrap();

        assert_eq!(c.calendar_base(), "http://localhost:8080");
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            config(&[("PORT", "eighty")]).err(),
            Some(ConfigError::InvalidPort("eighty".into()))
        );
        assert_eq!(
            config(&[("APP_ENV", "production")]).err(),
            Some(ConfigError::MissingPublicUrl)
        );
        assert_eq!(
            config(&[("PUBLIC_URL", "not a url")]).err(),
            Some(ConfigError::InvalidPublicUrl("not a url".into()))
        );
    }
}
