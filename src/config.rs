use crate::content::error::{ContentError, ContentErrorType};
use crate::routing::RoutePattern;
use crate::store::memory_session_store::MemorySessionStore;
use crate::store::persistent_session_store::PersistentSessionStore;
use crate::store::persistent_store::PersistentStore;
use crate::store::session_store::SessionStore;
use envconfig::Envconfig;
use log::info;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use strum::EnumString;

#[derive(Clone, EnumString, strum::Display, Eq, PartialEq)]
pub enum SessionStoreImplementation {
    InMemory,
    Persistent,
}

#[derive(Envconfig)]
struct EnvConfig {
    #[envconfig(from = "HOST", default = "0.0.0.0")]
    pub host: String,
    #[envconfig(from = "PORT", default = "3021")]
    pub port: u32,

    // ------------------
    // Set filename redirect
    /// Custom pattern of the set filename route, e.g. `/:sf_culture/files/:mt_content_module/:mt_content_action`.
    /// Actions have to pass route params themselves when it is set
    #[envconfig(from = "SET_FILENAME_ROUTE_PATTERN")]
    pub set_filename_route_pattern: Option<String>,

    // ------------------
    // Sessions
    #[envconfig(from = "SESSION_COOKIE_NAME", default = "mt_session")]
    pub session_cookie_name: String,
    #[envconfig(from = "SESSION_STORE_IMPLEMENTATION", default = "InMemory")]
    pub session_store_implementation: SessionStoreImplementation,
    /// Count of sessions kept in memory
    #[envconfig(from = "SESSION_CACHE_SIZE", default = "4096")]
    pub session_cache_size: NonZeroUsize,
    /// Persistent db location (directory) for sessions
    #[envconfig(from = "PERSISTENT_STORAGE_DIR", default = ".mt-content")]
    pub persistent_storage_dir: String,
    /// Seconds a persistent session record lives after its last write
    #[envconfig(from = "SESSION_TTL", default = "3600")]
    pub session_ttl: u64,

    // ------------------
    // Uploads
    #[envconfig(from = "UPLOAD_DIR", default = "uploads")]
    pub upload_dir: String,
    /// Where uploaded files wait until moved, system temp dir if not set
    #[envconfig(from = "UPLOAD_TMP_DIR")]
    pub upload_tmp_dir: Option<String>,
    /// Max probes for a free upload name, 0 for no limit
    #[envconfig(from = "UNIQUE_FILENAME_MAX_ATTEMPTS", default = "0")]
    pub unique_filename_max_attempts: usize,

    /// Request timeout in seconds
    #[envconfig(from = "REQUEST_TIMEOUT", default = "30")]
    pub request_timeout: u64,
}

pub struct Config {
    pub host: String,
    pub port: u32,
    pub set_filename_route: Option<RoutePattern>,
    pub session_cookie_name: String,
    pub session_store: Arc<dyn SessionStore + Send + Sync>,
    /// Present for persistent sessions only, flushed in background
    pub persistent_store: Option<Arc<PersistentStore>>,
    pub upload_dir: PathBuf,
    pub upload_tmp_dir: Option<PathBuf>,
    pub unique_filename_attempts: Option<NonZeroUsize>,
    pub request_timeout: Duration,
}

fn config_error(detail: String) -> ContentError {
    ContentError::new(ContentErrorType::Config, Some(detail))
}

impl Config {
    pub fn from_env() -> Result<Config, ContentError> {
        let env_conf = EnvConfig::init_from_env().map_err(|err| config_error(err.to_string()))?;
        Self::build(env_conf)
    }

    /// Same as [`Config::from_env`], reading variables from `vars`
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Config, ContentError> {
        let env_conf =
            EnvConfig::init_from_hashmap(vars).map_err(|err| config_error(err.to_string()))?;
        Self::build(env_conf)
    }

    fn build(env_conf: EnvConfig) -> Result<Config, ContentError> {
        let set_filename_route = match env_conf.set_filename_route_pattern.as_deref() {
            None => None,
            Some(pattern) if pattern.trim().is_empty() => None,
            Some(pattern) => Some(pattern.parse::<RoutePattern>()?),
        };
        match &set_filename_route {
            Some(route) => info!("Using set filename route {}", route),
            None => info!("Using default set filename route"),
        }

        let persistent_store = match env_conf.session_store_implementation {
            SessionStoreImplementation::Persistent => Some(Arc::new(PersistentStore::new(
                Box::from(Path::new(env_conf.persistent_storage_dir.as_str())),
                env_conf.session_cache_size,
                Duration::from_secs(env_conf.session_ttl),
            )?)),
            SessionStoreImplementation::InMemory => None,
        };

        info!("Using {} session store", env_conf.session_store_implementation);
        let session_store: Arc<dyn SessionStore + Send + Sync> = match &persistent_store {
            Some(store) => Arc::new(PersistentSessionStore::new(store.clone())),
            None => Arc::new(MemorySessionStore::new(Some(env_conf.session_cache_size))),
        };

        Ok(Config {
            host: env_conf.host,
            port: env_conf.port,
            set_filename_route,
            session_cookie_name: env_conf.session_cookie_name,
            session_store,
            persistent_store,
            upload_dir: PathBuf::from(env_conf.upload_dir),
            upload_tmp_dir: env_conf.upload_tmp_dir.map(PathBuf::from),
            unique_filename_attempts: NonZeroUsize::new(env_conf.unique_filename_max_attempts),
            request_timeout: Duration::from_secs(env_conf.request_timeout),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults() {
        let config = Config::from_map(&vars(&[])).unwrap();
        assert_eq!(config.port, 3021);
        assert!(config.set_filename_route.is_none());
        assert!(config.persistent_store.is_none());
        assert_eq!(config.session_cookie_name, "mt_session");
        assert_eq!(config.unique_filename_attempts, None);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn custom_route_and_limits() {
        let config = Config::from_map(&vars(&[
            ("SET_FILENAME_ROUTE_PATTERN", "/:sf_culture/files/:mt_content_module"),
            ("UNIQUE_FILENAME_MAX_ATTEMPTS", "100"),
            ("UPLOAD_TMP_DIR", "/var/tmp"),
        ]))
        .unwrap();
        assert_eq!(
            config.set_filename_route.unwrap().axum_path(),
            "/{sf_culture}/files/{mt_content_module}"
        );
        assert_eq!(config.unique_filename_attempts, NonZeroUsize::new(100));
        assert_eq!(config.upload_tmp_dir, Some(PathBuf::from("/var/tmp")));
    }

    #[test]
    fn blank_route_pattern_means_default() {
        let config = Config::from_map(&vars(&[("SET_FILENAME_ROUTE_PATTERN", "  ")])).unwrap();
        assert!(config.set_filename_route.is_none());
    }

    #[test]
    fn malformed_values_are_errors() {
        let err = Config::from_map(&vars(&[("SET_FILENAME_ROUTE_PATTERN", "files/:a")]))
            .err()
            .unwrap();
        assert_eq!(err.err_type, ContentErrorType::Routing);

        let err = Config::from_map(&vars(&[("SESSION_STORE_IMPLEMENTATION", "Redis")]))
            .err()
            .unwrap();
        assert_eq!(err.err_type, ContentErrorType::Config);
    }

    #[test]
    fn persistent_sessions_open_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_map(&vars(&[
            ("SESSION_STORE_IMPLEMENTATION", "Persistent"),
            ("PERSISTENT_STORAGE_DIR", dir.path().to_str().unwrap()),
        ]))
        .unwrap();
        assert!(config.persistent_store.is_some());
    }
}
