use std::time::Duration;

use anyhow::{bail, Context};
use reqwest::Url;

// Address of the vehicle when it runs its own access point
const DEFAULT_URL: &str = "http://192.168.4.1";
const DEFAULT_CONTROL_INTERVAL_MS: u64 = 50;
const DEFAULT_TELEMETRY_INTERVAL_MS: u64 = 200;

const URL_VAR: &str = "DUC_REMOTE_URL";
const CONTROL_MS_VAR: &str = "DUC_REMOTE_CONTROL_MS";
const TELEMETRY_MS_VAR: &str = "DUC_REMOTE_TELEMETRY_MS";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: Url,
    pub control_interval: Duration,
    pub telemetry_interval: Duration,
}

impl Config {
    /// Load from the process environment and command line.
    ///
    /// The first command-line argument, if any, overrides the vehicle URL.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_sources(|key| std::env::var(key).ok(), std::env::args().skip(1))
    }

    pub fn from_sources(
        var: impl Fn(&str) -> Option<String>,
        mut args: impl Iterator<Item = String>,
    ) -> anyhow::Result<Self> {
        let url = args
            .next()
            .or_else(|| var(URL_VAR))
            .unwrap_or_else(|| DEFAULT_URL.to_string());
        let base_url = Url::parse(&url).with_context(|| format!("Invalid vehicle URL {url:?}"))?;

        Ok(Config {
            base_url,
            control_interval: interval(&var, CONTROL_MS_VAR, DEFAULT_CONTROL_INTERVAL_MS)?,
            telemetry_interval: interval(&var, TELEMETRY_MS_VAR, DEFAULT_TELEMETRY_INTERVAL_MS)?,
        })
    }
}

fn interval(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
    default_ms: u64,
) -> anyhow::Result<Duration> {
    let millis = match var(key) {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{key} must be a number of milliseconds, got {value:?}"))?,
        None => default_ms,
    };
    if millis == 0 {
        bail!("{key} must be greater than zero");
    }
    Ok(Duration::from_millis(millis))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)], args: &[&str]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_sources(
            |key| vars.get(key).cloned(),
            args.iter().map(|a| a.to_string()),
        )
    }

    #[test]
    fn test_defaults() {
        let config = load(&[], &[]).unwrap();
        assert_eq!(config.base_url.as_str(), "http://192.168.4.1/");
        assert_eq!(config.control_interval, Duration::from_millis(50));
        assert_eq!(config.telemetry_interval, Duration::from_millis(200));
    }

    #[test]
    fn test_environment_overrides() {
        let config = load(
            &[
                ("DUC_REMOTE_URL", "http://10.0.0.7:8080"),
                ("DUC_REMOTE_CONTROL_MS", "20"),
                ("DUC_REMOTE_TELEMETRY_MS", " 500 "),
            ],
            &[],
        )
        .unwrap();
        assert_eq!(config.base_url.as_str(), "http://10.0.0.7:8080/");
        assert_eq!(config.control_interval, Duration::from_millis(20));
        assert_eq!(config.telemetry_interval, Duration::from_millis(500));
    }

    #[test]
    fn test_argument_beats_environment() {
        let config = load(
            &[("DUC_REMOTE_URL", "http://10.0.0.7")],
            &["http://drone.local"],
        )
        .unwrap();
        assert_eq!(config.base_url.host_str(), Some("drone.local"));
    }

    #[test]
    fn test_invalid_values() {
        assert!(load(&[], &["not a url"]).is_err());
        assert!(load(&[("DUC_REMOTE_CONTROL_MS", "fast")], &[]).is_err());
        assert!(load(&[("DUC_REMOTE_TELEMETRY_MS", "0")], &[]).is_err());
    }
}
