use crate::errors::ConfigError;
use crate::models::traffic::{MetricKind, RepoRef};
use std::env;

pub const USERNAME_VAR: &str = "GH_USERNAME";
pub const ACCESS_TOKEN_VAR: &str = "GH_ACCESS_TOKEN";
pub const API_URL_VAR: &str = "GITHUB_API_URL";

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Repositories polled on every run.
pub const REPOS: [RepoRef; 5] = [
    RepoRef::new("substrate-developer-hub", "substrate-node-template"),
    RepoRef::new("substrate-developer-hub", "substrate-front-end-template"),
    RepoRef::new("substrate-developer-hub", "recipes"),
    RepoRef::new("substrate-developer-hub", "substrate-parachain-template"),
    RepoRef::new("substrate-developer-hub", "substrate-pallet-template"),
];

pub const METRICS: [MetricKind; 2] = [MetricKind::Clones, MetricKind::Views];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub api_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let (username, token) = match (non_empty(USERNAME_VAR), non_empty(ACCESS_TOKEN_VAR)) {
            (Some(u), Some(t)) => (u, t),
            _ => return Err(ConfigError::MissingCredentials),
        };

        let api_base_url = non_empty(API_URL_VAR)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            credentials: Credentials { username, token },
            api_base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_both_credentials_present() {
        let config = Config::from_lookup(lookup_from(&[
            (USERNAME_VAR, "octocat"),
            (ACCESS_TOKEN_VAR, "ghp_secret"),
        ]))
        .unwrap();

        assert_eq!(config.credentials.username, "octocat");
        assert_eq!(config.credentials.token, "ghp_secret");
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_missing_or_empty_credentials() {
        let cases: [&[(&str, &str)]; 4] = [
            &[],
            &[(USERNAME_VAR, "octocat")],
            &[(ACCESS_TOKEN_VAR, "ghp_secret")],
            &[(USERNAME_VAR, ""), (ACCESS_TOKEN_VAR, "ghp_secret")],
        ];

        for vars in cases {
            let err = Config::from_lookup(lookup_from(vars)).unwrap_err();
            assert_eq!(err, ConfigError::MissingCredentials);
            assert_eq!(err.exit_code(), 5);
        }
    }

    #[test]
    fn test_error_message_names_both_variables() {
        let message = ConfigError::MissingCredentials.to_string();
        assert!(message.contains(USERNAME_VAR));
        assert!(message.contains(ACCESS_TOKEN_VAR));
    }

    #[test]
    fn test_api_url_override_trims_trailing_slash() {
        let config = Config::from_lookup(lookup_from(&[
            (USERNAME_VAR, "octocat"),
            (ACCESS_TOKEN_VAR, "ghp_secret"),
            (API_URL_VAR, "http://127.0.0.1:1234/"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "http://127.0.0.1:1234");
    }
}
