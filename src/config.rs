use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 3000);
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_NOTE_FOLDER_COLUMN: &str = "folderid";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. Without it the service keeps its data in memory.
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub run_migrations: bool,
    /// Column of the notes table that references the owning folder.
    pub note_folder_column: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let bind_addr = parse_or("BIND_ADDR", &lookup, DEFAULT_BIND_ADDR)?;
        let max_connections = parse_or("DB_MAX_CONNECTIONS", &lookup, DEFAULT_MAX_CONNECTIONS)?;
        let run_migrations = match lookup("RUN_MIGRATIONS") {
            None => true,
            Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
                name: "RUN_MIGRATIONS",
                value,
            })?,
        };

        let note_folder_column = lookup("NOTEFUL_NOTE_FOLDER_COLUMN")
            .unwrap_or_else(|| DEFAULT_NOTE_FOLDER_COLUMN.to_string());
        if !is_identifier(&note_folder_column) {
            return Err(ConfigError::Invalid {
                name: "NOTEFUL_NOTE_FOLDER_COLUMN",
                value: note_folder_column,
            });
        }

        Ok(Config {
            database_url,
            bind_addr,
            max_connections,
            run_migrations,
            note_folder_column,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Plain SQL identifier: it is spliced into queries, so no quoting is allowed.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
