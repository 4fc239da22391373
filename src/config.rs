use crate::errors::ClientError;
use reqwest::Url;
use std::{env, time::Duration};

pub const DEFAULT_URL: &str = "http://127.0.0.1:8000/";
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub tick: Duration,
}

impl Config {
    pub fn new(base_url: &str, tick: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            tick: if tick.is_zero() { DEFAULT_TICK } else { tick },
        })
    }
}

/// Reads `DASHBOARD_URL` and `DASHBOARD_TICK_MS`; `url_override` wins over the environment.
pub fn resolve_config(url_override: Option<&str>) -> Result<Config, ClientError> {
    resolve_config_with(url_override, |key| env::var(key).ok())
}

pub fn resolve_config_with(
    url_override: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Config, ClientError> {
    let url = match url_override {
        Some(url) => url.to_string(),
        None => lookup("DASHBOARD_URL").unwrap_or_else(|| DEFAULT_URL.to_string()),
    };

    let tick = lookup("DASHBOARD_TICK_MS")
        .and_then(|value| value.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_TICK);

    Config::new(&url, tick)
}

fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    let url = Url::parse(&raw).map_err(|err| ClientError::config(format!("invalid base url {raw}: {err}")))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::config(format!("{raw} cannot be used as a base url")));
    }
    Ok(url)
}
