use std::{
    net::{Ipv4Addr, SocketAddr, SocketAddrV4},
    path::PathBuf,
};

use crate::{ConfigurationError, Result};

pub const RULES_FILE_VAR: &str = "AUTHZ_RULES_FILE";
pub const LISTEN_ADDR_VAR: &str = "AUTHZ_LISTEN_ADDR";

const DEFAULT_RULES_FILE: &str = "rules.yaml";
const DEFAULT_LISTEN_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8080));

/// Service settings.
///
/// Environment variables:
/// - `AUTHZ_RULES_FILE` - path of the yaml rules file (default: `rules.yaml`)
/// - `AUTHZ_LISTEN_ADDR` - HTTP listen address (default: `0.0.0.0:8080`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub rules_path: PathBuf,
    pub listen_addr: SocketAddr,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rules_path: PathBuf::from(DEFAULT_RULES_FILE),
            listen_addr: DEFAULT_LISTEN_ADDR,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rules_path = lookup(RULES_FILE_VAR)
            .filter(|value| !value.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_RULES_FILE), PathBuf::from);

        let listen_addr = match lookup(LISTEN_ADDR_VAR).filter(|value| !value.is_empty()) {
            Some(value) => value
                .parse::<SocketAddr>()
                .map_err(|e| ConfigurationError::Setting {
                    name: LISTEN_ADDR_VAR,
                    message: format!("{value:?} is not a socket address ({e})"),
                })?,
            None => DEFAULT_LISTEN_ADDR,
        };

        Ok(Self {
            rules_path,
            listen_addr,
        })
    }
}
