use sanma_core::Ruleset;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read ruleset file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse ruleset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("bad SANMA_ADDR {0:?}: {1}")]
    Addr(String, std::net::AddrParseError),
}

/// Server settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub addr: SocketAddr,
    /// Applied to requests that do not carry their own ruleset.
    pub rules: Ruleset,
}

impl Settings {
    /// `SANMA_ADDR` for the bind address, `SANMA_RULESET` for an optional
    /// JSON ruleset file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = std::env::var("SANMA_ADDR").ok();
        let rules = std::env::var_os("SANMA_RULESET");
        Self::resolve(addr.as_deref(), rules.as_deref().map(Path::new))
    }

    fn resolve(addr: Option<&str>, ruleset: Option<&Path>) -> Result<Self, ConfigError> {
        let raw = addr.unwrap_or(DEFAULT_ADDR);
        let addr = raw
            .parse()
            .map_err(|e| ConfigError::Addr(raw.to_string(), e))?;

        let rules = match ruleset {
            Some(path) => load_ruleset(path)?,
            None => Ruleset::default(),
        };

        Ok(Settings { addr, rules })
    }
}

/// Missing fields fall back to their defaults.
pub fn load_ruleset<P: AsRef<Path>>(path: P) -> Result<Ruleset, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
