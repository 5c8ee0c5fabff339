use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_INTERPRETER: &str = "python3";
const DEFAULT_CLIENT_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_DISPATCH_TIMEOUT_SECS: u64 = 30;
const DEFAULT_COOLDOWN_SECS: u64 = 5;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Where a prepared configuration record goes after the send path builds it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchMode {
    /// Build the record and discard it
    None,
    /// Run `<interpreter> <flags> <script> <args>`
    Script { interpreter: String, script: PathBuf },
    /// POST the transfer to the blobchain client's `/transaction` endpoint
    Client { base_url: String },
}

#[derive(Debug, Clone)]
pub struct WalletConfig {
    pub discord_token: String,
    pub dispatch: DispatchMode,
    pub dispatch_timeout: Duration,
    pub cooldown: Duration,
}

impl WalletConfig {
    /// Load from the process environment (after `.env` has been applied)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let dispatch = match lookup("BLOBWALLET_DISPATCH")
            .map(|m| m.trim().to_lowercase())
            .as_deref()
        {
            None | Some("") | Some("none") => DispatchMode::None,
            Some("script") => {
                let script = lookup("BLOBWALLET_SCRIPT")
                    .filter(|s| !s.trim().is_empty())
                    .ok_or(ConfigError::Missing("BLOBWALLET_SCRIPT"))?;
                DispatchMode::Script {
                    interpreter: lookup("BLOBWALLET_INTERPRETER")
                        .filter(|i| !i.trim().is_empty())
                        .unwrap_or_else(|| DEFAULT_INTERPRETER.to_string()),
                    script: PathBuf::from(script),
                }
            }
            Some("client") => DispatchMode::Client {
                base_url: lookup("BLOBWALLET_CLIENT_URL")
                    .filter(|u| !u.trim().is_empty())
                    .map(|u| u.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_CLIENT_URL.to_string()),
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "BLOBWALLET_DISPATCH",
                    value: other.to_string(),
                })
            }
        };

        let dispatch_timeout = parse_secs(
            &lookup,
            "BLOBWALLET_DISPATCH_TIMEOUT_SECS",
            DEFAULT_DISPATCH_TIMEOUT_SECS,
        )?;
        if dispatch_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                name: "BLOBWALLET_DISPATCH_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }

        let cooldown = parse_secs(&lookup, "BLOBWALLET_COOLDOWN_SECS", DEFAULT_COOLDOWN_SECS)?;

        Ok(Self {
            discord_token,
            dispatch,
            dispatch_timeout,
            cooldown,
        })
    }
}

fn parse_secs<F>(lookup: &F, name: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(Duration::from_secs(default)),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<WalletConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        WalletConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("DISCORD_TOKEN", "abc")]).expect("config");
        assert_eq!(config.discord_token, "abc");
        assert_eq!(config.dispatch, DispatchMode::None);
        assert_eq!(config.dispatch_timeout, Duration::from_secs(30));
        assert_eq!(config.cooldown, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_token() {
        assert_eq!(
            config_from(&[]).unwrap_err(),
            ConfigError::Missing("DISCORD_TOKEN")
        );
    }

    #[test]
    fn test_script_mode_requires_script() {
        let err = config_from(&[("DISCORD_TOKEN", "abc"), ("BLOBWALLET_DISPATCH", "script")])
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing("BLOBWALLET_SCRIPT"));

        let config = config_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("BLOBWALLET_DISPATCH", "Script"),
            ("BLOBWALLET_SCRIPT", "blobchain/client.py"),
        ])
        .expect("config");
        assert_eq!(
            config.dispatch,
            DispatchMode::Script {
                interpreter: "python3".to_string(),
                script: PathBuf::from("blobchain/client.py"),
            }
        );
    }

    #[test]
    fn test_client_mode_trims_trailing_slash() {
        let config = config_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("BLOBWALLET_DISPATCH", "client"),
            ("BLOBWALLET_CLIENT_URL", "http://10.0.0.2:5000/"),
        ])
        .expect("config");
        assert_eq!(
            config.dispatch,
            DispatchMode::Client {
                base_url: "http://10.0.0.2:5000".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config_from(&[("DISCORD_TOKEN", "abc"), ("BLOBWALLET_DISPATCH", "carrier-pigeon")]),
            Err(ConfigError::Invalid { name: "BLOBWALLET_DISPATCH", .. })
        ));
        assert!(matches!(
            config_from(&[("DISCORD_TOKEN", "abc"), ("BLOBWALLET_COOLDOWN_SECS", "soon")]),
            Err(ConfigError::Invalid { name: "BLOBWALLET_COOLDOWN_SECS", .. })
        ));
        assert!(matches!(
            config_from(&[("DISCORD_TOKEN", "abc"), ("BLOBWALLET_DISPATCH_TIMEOUT_SECS", "0")]),
            Err(ConfigError::Invalid { name: "BLOBWALLET_DISPATCH_TIMEOUT_SECS", .. })
        ));
    }
}
