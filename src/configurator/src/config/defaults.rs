use crate::config::PmmConfig;
use crate::constants::{
    DEFAULT_CONFIG_PATH, DEFAULT_GRAFANA_DB_PATH, DEFAULT_HTPASSWD_PATH, DEFAULT_LISTEN_ADDRESS,
    DEFAULT_PROMETHEUS_CONF_PATH, DEFAULT_SSH_KEY_OWNER, DEFAULT_UPDATER_PATH,
    DEFAULT_UPDATE_DIR_PATH, DEFAULT_URL_PREFIX, UPDATE_POLL_INTERVAL_MS, UPDATE_TIMEOUT_MS,
};
use std::collections::HashMap;
use std::path::PathBuf;

impl Default for PmmConfig {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG_PATH),
            htpasswd_path: PathBuf::from(DEFAULT_HTPASSWD_PATH),
            listen_address: DEFAULT_LISTEN_ADDRESS.to_string(),
            url_prefix: DEFAULT_URL_PREFIX.to_string(),
            ssh_key_path: String::new(),
            ssh_key_owner: DEFAULT_SSH_KEY_OWNER.to_string(),
            grafana_db_path: PathBuf::from(DEFAULT_GRAFANA_DB_PATH),
            prometheus_conf_path: PathBuf::from(DEFAULT_PROMETHEUS_CONF_PATH),
            update_dir_path: PathBuf::from(DEFAULT_UPDATE_DIR_PATH),
            updater_path: PathBuf::from(DEFAULT_UPDATER_PATH),
            updater_args: vec![],
            update_timeout_ms: UPDATE_TIMEOUT_MS,
            update_poll_interval_ms: UPDATE_POLL_INTERVAL_MS,
            log_dir: None,
            configuration: HashMap::new(),
            users: vec![],
        }
    }
}
