//! Server configuration, read from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::GraphCacheConfig;
use crate::store::{FileStore, HttpStore, HttpStoreConfig, StoreBackend, StoreError};

pub const ENV_BIND: &str = "RAIL_ROUTER_BIND";
pub const ENV_DATA_DIR: &str = "RAIL_ROUTER_DATA_DIR";
pub const ENV_STORE_URL: &str = "RAIL_ROUTER_STORE_URL";
pub const ENV_API_KEY: &str = "RAIL_ROUTER_API_KEY";
pub const ENV_GRAPH_TTL_SECS: &str = "RAIL_ROUTER_GRAPH_TTL_SECS";
pub const ENV_SEARCH_LIMIT: &str = "RAIL_ROUTER_SEARCH_LIMIT";

/// Errors in the environment configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Neither a data directory nor a store URL was given
    #[error("no data store configured: set RAIL_ROUTER_DATA_DIR or RAIL_ROUTER_STORE_URL")]
    MissingStore,

    /// A variable had an unparseable value
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Where station and connection records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreSource {
    /// JSON files in a local directory.
    Directory(PathBuf),
    /// JSON arrays served over HTTP.
    Http { url: String, api_key: Option<String> },
}

/// Configuration for the routing server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Data store to read records from.
    pub store: StoreSource,

    /// How long to reuse a built graph. `None` rebuilds for every query.
    pub graph_ttl: Option<Duration>,

    /// Maximum number of candidates returned by station search.
    pub search_limit: usize,
}

impl AppConfig {
    /// Create a configuration with defaults for everything but the store.
    pub fn new(store: StoreSource) -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            store,
            graph_ttl: None,
            search_limit: 10,
        }
    }

    /// Reuse built graphs for the given duration.
    pub fn with_graph_ttl(mut self, ttl: Duration) -> Self {
        self.graph_ttl = Some(ttl);
        self
    }

    /// Listen on a different address.
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through a variable lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let store = match (get(ENV_DATA_DIR), get(ENV_STORE_URL)) {
            (Some(dir), _) => StoreSource::Directory(PathBuf::from(dir)),
            (None, Some(url)) => StoreSource::Http {
                url,
                api_key: get(ENV_API_KEY),
            },
            (None, None) => return Err(ConfigError::MissingStore),
        };

        let mut config = Self::new(store);

        if let Some(bind) = get(ENV_BIND) {
            config.bind_addr = parse(ENV_BIND, &bind)?;
        }

        if let Some(ttl) = get(ENV_GRAPH_TTL_SECS) {
            let secs: u64 = parse(ENV_GRAPH_TTL_SECS, &ttl)?;
            config.graph_ttl = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Some(limit) = get(ENV_SEARCH_LIMIT) {
            config.search_limit = parse(ENV_SEARCH_LIMIT, &limit)?;
        }

        Ok(config)
    }

    /// Graph cache settings, if caching is enabled.
    pub fn graph_cache(&self) -> Option<GraphCacheConfig> {
        self.graph_ttl.map(GraphCacheConfig::new)
    }

    /// Create the configured data store.
    pub fn build_store(&self) -> Result<StoreBackend, StoreError> {
        match &self.store {
            StoreSource::Directory(dir) => Ok(FileStore::new(dir).into()),
            StoreSource::Http { url, api_key } => {
                let mut config = HttpStoreConfig::new(url);
                if let Some(key) = api_key {
                    config = config.with_api_key(key);
                }
                Ok(HttpStore::new(config)?.into())
            }
        }
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}
