//! Process configuration, read once from the environment at startup.
//!
//! A `.env` file in the working directory is loaded first if present.
//! `DATABASE_URL` wins over the individual `DB_*` variables. The `DB_*`
//! parts are handed to the driver as separate options, never spliced into a
//! URL, so credentials may contain any character.

use std::{fmt, str::FromStr};

use sqlx::postgres::PgConnectOptions;

use crate::error::ConfigError;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Which `TodoStore` implementation the binary runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    /// Split off `DB_HOST` when it has a `:port` suffix.
    pub port: Option<u16>,
    pub name: String,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .username(&self.user)
            .password(&self.password)
            .host(&self.host)
            .database(&self.name);
        match self.port {
            Some(port) => options.port(port),
            None => options,
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum DatabaseSource {
    Url(String),
    Parts(DatabaseConfig),
}

impl DatabaseSource {
    /// # Errors
    /// Returns the driver's error when `DATABASE_URL` does not parse.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match self {
            Self::Url(url) => PgConnectOptions::from_str(url),
            Self::Parts(parts) => Ok(parts.connect_options()),
        }
    }
}

impl fmt::Debug for DatabaseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // May embed a password.
            Self::Url(_) => f.write_str("Url(<redacted>)"),
            Self::Parts(parts) => f.debug_tuple("Parts").field(parts).finish(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub store: StoreKind,
    /// Only populated for `StoreKind::Postgres`.
    pub database: Option<DatabaseSource>,
    pub max_connections: u32,
}

impl Config {
    /// Load `.env` (if any) and read the process environment.
    ///
    /// # Errors
    /// Returns `ConfigError` when a required variable is missing or a value
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "failed to load .env file");
            }
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or("PORT", &lookup, DEFAULT_PORT)?;
        let max_connections = parse_or("DB_MAX_CONNECTIONS", &lookup, DEFAULT_MAX_CONNECTIONS)?;

        let store = match lookup("TODO_STORE").as_deref() {
            None | Some("postgres") => StoreKind::Postgres,
            Some("memory") => StoreKind::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "TODO_STORE",
                    value: other.to_string(),
                })
            }
        };

        let database = match store {
            StoreKind::Memory => None,
            StoreKind::Postgres => Some(match lookup("DATABASE_URL") {
                Some(url) => DatabaseSource::Url(url),
                None => {
                    let user = require("DB_USER", &lookup)?;
                    let password = require("DB_PASSWORD", &lookup)?;
                    let (host, port) = split_host(require("DB_HOST", &lookup)?)?;
                    DatabaseSource::Parts(DatabaseConfig {
                        user,
                        password,
                        host,
                        port,
                        name: require("DB_NAME", &lookup)?,
                    })
                }
            }),
        };

        Ok(Self {
            port,
            store,
            database,
            max_connections,
        })
    }
}

fn require<F>(name: &'static str, lookup: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).ok_or(ConfigError::Missing(name))
}

/// `host`, `host:port`, `[v6]` or `[v6]:port`.
fn split_host(raw: String) -> Result<(String, Option<u16>), ConfigError> {
    let invalid = |raw: &str| ConfigError::Invalid {
        name: "DB_HOST",
        value: raw.to_string(),
    };

    let (host, port) = if let Some(rest) = raw.strip_prefix('[') {
        let (host, tail) = rest.split_once(']').ok_or_else(|| invalid(&raw))?;
        match tail {
            "" => (host, None),
            _ => (host, Some(tail.strip_prefix(':').ok_or_else(|| invalid(&raw))?)),
        }
    } else {
        match raw.rsplit_once(':') {
            Some((host, port)) if !host.contains(':') => (host, Some(port)),
            _ => (raw.as_str(), None),
        }
    };

    if host.is_empty() {
        return Err(invalid(&raw));
    }
    let port = port
        .map(|p| p.parse::<u16>().map_err(|_| invalid(&raw)))
        .transpose()?;
    Ok((host.to_string(), port))
}

fn parse_or<T, F>(name: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
