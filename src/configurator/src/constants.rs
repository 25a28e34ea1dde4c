pub const DEFAULT_CONFIG_PATH: &str = "/srv/update/pmm-manage.yml";
pub const DEFAULT_HTPASSWD_PATH: &str = "/srv/nginx/.htpasswd";
pub const DEFAULT_LISTEN_ADDRESS: &str = "127.0.0.1:7777";
pub const DEFAULT_URL_PREFIX: &str = "/configurator";
pub const DEFAULT_SSH_KEY_OWNER: &str = "admin";
pub const DEFAULT_GRAFANA_DB_PATH: &str = "/srv/grafana/grafana.db";
pub const DEFAULT_PROMETHEUS_CONF_PATH: &str = "/etc/prometheus.yml";
pub const DEFAULT_UPDATE_DIR_PATH: &str = "/srv/update";
pub const DEFAULT_UPDATER_PATH: &str = "/usr/bin/pmm-update";

pub const UPDATE_TIMEOUT_MS: u64 = 5000;
pub const UPDATE_POLL_INTERVAL_MS: u64 = 250;

/// Layout the updater maintains under `update-dir-path`.
pub const UPDATE_LOG_DIR: &str = "log";
pub const UPDATE_PID_FILE: &str = "pmm-update.pid";

pub const LOG_FILE_NAME: &str = "configurator.log";

pub const MASKED_PASSWORD: &str = "********";
