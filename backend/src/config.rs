use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use shared::constants::DEFAULT_PORT;

use crate::constants::{DEFAULT_DIST, DEFAULT_HOST, DEFAULT_SESSION_HOURS, ENV_DIST, ENV_HOST, ENV_PORT, ENV_SESSION_HOURS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
    pub dist: String,
    pub session_lifetime: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Missing or unparsable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = parse_or(&lookup, ENV_HOST, IpAddr::from(DEFAULT_HOST));
        let port = parse_or(&lookup, ENV_PORT, DEFAULT_PORT);
        let hours = parse_or(&lookup, ENV_SESSION_HOURS, DEFAULT_SESSION_HOURS);
        Self {
            addr: SocketAddr::new(host, port),
            dist: lookup(ENV_DIST).unwrap_or_else(|| DEFAULT_DIST.to_string()),
            session_lifetime: Duration::from_secs(hours * 60 * 60),
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(value) => match value.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("{key}: cannot parse {value:?}, using default");
                default
            }
        },
        None => default,
    }
}
