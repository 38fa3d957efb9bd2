use std::env;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use dotenvy::dotenv;
use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "app.db";
const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 5555));
const DEFAULT_POOL_SIZE: u32 = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub pool_size: u32,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DB_URI")
            .map(|value| sqlite_path(&value))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let bind_addr = match lookup("BIND_ADDR") {
            Some(value) => value
                .parse::<SocketAddr>()
                .map_err(|_| ConfigError::Invalid { name: "BIND_ADDR", value })?,
            None => DEFAULT_BIND_ADDR,
        };

        let pool_size = match lookup("DB_POOL_SIZE") {
            Some(value) => value
                .parse::<u32>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or(ConfigError::Invalid { name: "DB_POOL_SIZE", value })?,
            None => DEFAULT_POOL_SIZE,
        };

        Ok(Self {
            database_url,
            bind_addr,
            pool_size,
        })
    }
}

/// Accepts both a bare path and the `sqlite:///path` URL form.
/// `sqlite://` with no path is an in-memory database.
fn sqlite_path(value: &str) -> String {
    match value.strip_prefix("sqlite://") {
        Some("") => ":memory:".to_string(),
        Some(rest) => rest.strip_prefix('/').unwrap_or(rest).to_string(),
        None => value.to_string(),
    }
}
