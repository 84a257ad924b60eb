use std::env;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, Result};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub request_timeout: Duration,
    pub pubsub_capacity: usize,
    pub introspection: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            allowed_origins: vec!["http://localhost:3000".to_string()],
            request_timeout: Duration::from_secs(30),
            pubsub_capacity: infra::pubsub::DEFAULT_CAPACITY,
            introspection: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the config from a variable lookup. Unparseable numbers fall back
    /// to their defaults.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            host: var("HOST").unwrap_or(defaults.host),
            port: var("PORT")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.port),
            allowed_origins: var("ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or(defaults.allowed_origins),
            request_timeout: var("REQUEST_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            pubsub_capacity: var("PUBSUB_CAPACITY")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.pubsub_capacity),
            introspection: var("GQL_INTROSPECTION")
                .map(|v| v.to_lowercase() == "true")
                .unwrap_or(defaults.introspection),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .trim()
            .parse()
            .with_context(|| format!("Invalid listen address {:?}", self.host))?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
