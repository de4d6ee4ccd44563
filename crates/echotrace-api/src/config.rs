//! Hub configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_PROFILES_PATH: &str = "accessibility_profiles.yaml";
const DEFAULT_NODES: &str = "object1,object2,object3";
const DEFAULT_REQUIRED_FRAGMENTS: usize = 3;

/// Settings the hub binary starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Location of the accessibility profile document.
    pub profiles_path: PathBuf,
    /// Node identifiers that receive runtime payloads.
    pub nodes: Vec<String>,
    /// Distinct triggers needed to unlock the narrative.
    pub required_fragments: usize,
}

impl HubConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which returns the value of a
    /// variable if it is set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };
        let profiles_path = lookup("ECHOTRACE_PROFILES_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_PROFILES_PATH), PathBuf::from);

        let nodes: Vec<String> = lookup("ECHOTRACE_NODES")
            .unwrap_or_else(|| DEFAULT_NODES.to_owned())
            .split(',')
            .map(str::trim)
            .filter(|node| !node.is_empty())
            .map(str::to_owned)
            .collect();
        if nodes.is_empty() {
            return Err(AppError::Config(
                "ECHOTRACE_NODES must name at least one node".to_owned(),
            ));
        }

        let required_fragments = match lookup("ECHOTRACE_REQUIRED_FRAGMENTS") {
            Some(raw) => raw.parse::<usize>().map_err(|e| {
                AppError::Config(format!(
                    "ECHOTRACE_REQUIRED_FRAGMENTS must be a positive integer: {e}"
                ))
            })?,
            None => DEFAULT_REQUIRED_FRAGMENTS,
        };
        if required_fragments == 0 {
            return Err(AppError::Config(
                "ECHOTRACE_REQUIRED_FRAGMENTS must be at least 1".to_owned(),
            ));
        }

        Ok(Self {
            host,
            port,
            profiles_path,
            nodes,
            required_fragments,
        })
    }

    /// Address to bind the listener to.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host` and `port` do not form a valid
    /// socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
