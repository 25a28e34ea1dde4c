use crate::constants::{
    DEFAULT_CONFIG_PATH, DEFAULT_GRAFANA_DB_PATH, DEFAULT_HTPASSWD_PATH, DEFAULT_LISTEN_ADDRESS,
    DEFAULT_PROMETHEUS_CONF_PATH, DEFAULT_SSH_KEY_OWNER, DEFAULT_UPDATER_PATH,
    DEFAULT_UPDATE_DIR_PATH, DEFAULT_URL_PREFIX, UPDATE_LOG_DIR, UPDATE_PID_FILE,
    UPDATE_POLL_INTERVAL_MS, UPDATE_TIMEOUT_MS,
};
use crate::updates::LaunchSettings;
use anyhow::{Context, Result};
use config::{Config as RConfig, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Process-wide settings. Read-only after startup apart from [`PmmConfig::save`].
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct PmmConfig {
    pub config: PathBuf,
    pub htpasswd_path: PathBuf,
    pub listen_address: String,
    pub url_prefix: String,
    pub ssh_key_path: String,
    pub ssh_key_owner: String,
    pub grafana_db_path: PathBuf,
    pub prometheus_conf_path: PathBuf,
    pub update_dir_path: PathBuf,
    pub updater_path: PathBuf,
    #[serde(default)]
    pub updater_args: Vec<String>,
    pub update_timeout_ms: u64,
    pub update_poll_interval_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    // only settable from the file
    #[serde(default)]
    pub configuration: HashMap<String, String>,
    #[serde(default)]
    pub users: Vec<HashMap<String, String>>,
}

impl PmmConfig {
    pub fn update_log_dir(&self) -> PathBuf {
        self.update_dir_path.join(UPDATE_LOG_DIR)
    }

    pub fn update_pid_file(&self) -> PathBuf {
        self.update_dir_path.join(UPDATE_PID_FILE)
    }

    pub fn launch_settings(&self) -> LaunchSettings {
        LaunchSettings {
            timeout: Duration::from_millis(self.update_timeout_ms),
            poll_interval: Duration::from_millis(self.update_poll_interval_ms.max(1)),
        }
    }

    /// `url-prefix` as a route prefix: leading slash, no trailing slash, empty for root.
    pub fn route_prefix(&self) -> String {
        let trimmed = self.url_prefix.trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        }
    }

    /// Writes the current values back to the file named by `config`.
    pub fn save(&self) -> Result<()> {
        let yaml = serde_yaml::to_string(self).context("Cannot encode configuration")?;
        std::fs::write(&self.config, yaml)
            .with_context(|| format!("Cannot save configuration file {:?}", self.config))?;
        info!("configuration saved to {:?}", self.config);
        Ok(())
    }
}

/// Values given on the command line; each one beats the file and the default.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub config: Option<String>,
    pub htpasswd_path: Option<String>,
    pub listen_address: Option<String>,
    pub url_prefix: Option<String>,
    pub ssh_key_path: Option<String>,
    pub ssh_key_owner: Option<String>,
    pub grafana_db_path: Option<String>,
    pub prometheus_conf_path: Option<String>,
    pub update_dir_path: Option<String>,
    pub updater_path: Option<String>,
    pub updater_args: Option<Vec<String>>,
    pub update_timeout_ms: Option<u64>,
    pub update_poll_interval_ms: Option<u64>,
    pub log_dir: Option<String>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then the YAML file (if it exists), then command-line overrides.
    pub fn load(overrides: &ConfigOverrides) -> Result<PmmConfig> {
        let config_path = overrides
            .config
            .clone()
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        let mut builder = RConfig::builder();

        // set defaults
        builder = builder
            .set_default("config", DEFAULT_CONFIG_PATH)?
            .set_default("htpasswd-path", DEFAULT_HTPASSWD_PATH)?
            .set_default("listen-address", DEFAULT_LISTEN_ADDRESS)?
            .set_default("url-prefix", DEFAULT_URL_PREFIX)?
            .set_default("ssh-key-path", "")?
            .set_default("ssh-key-owner", DEFAULT_SSH_KEY_OWNER)?
            .set_default("grafana-db-path", DEFAULT_GRAFANA_DB_PATH)?
            .set_default("prometheus-conf-path", DEFAULT_PROMETHEUS_CONF_PATH)?
            .set_default("update-dir-path", DEFAULT_UPDATE_DIR_PATH)?
            .set_default("updater-path", DEFAULT_UPDATER_PATH)?
            .set_default::<&str, Vec<&str>>("updater-args", vec![])?
            .set_default("update-timeout-ms", UPDATE_TIMEOUT_MS)?
            .set_default("update-poll-interval-ms", UPDATE_POLL_INTERVAL_MS)?;

        builder = builder.add_source(
            File::from(Path::new(&config_path))
                .format(FileFormat::Yaml)
                .required(false),
        );

        // set overrides
        builder = builder
            .set_override("config", config_path.as_str())?
            .set_override_option("htpasswd-path", overrides.htpasswd_path.clone())?
            .set_override_option("listen-address", overrides.listen_address.clone())?
            .set_override_option("url-prefix", overrides.url_prefix.clone())?
            .set_override_option("ssh-key-path", overrides.ssh_key_path.clone())?
            .set_override_option("ssh-key-owner", overrides.ssh_key_owner.clone())?
            .set_override_option("grafana-db-path", overrides.grafana_db_path.clone())?
            .set_override_option(
                "prometheus-conf-path",
                overrides.prometheus_conf_path.clone(),
            )?
            .set_override_option("update-dir-path", overrides.update_dir_path.clone())?
            .set_override_option("updater-path", overrides.updater_path.clone())?
            .set_override_option("updater-args", overrides.updater_args.clone())?
            .set_override_option("update-timeout-ms", overrides.update_timeout_ms)?
            .set_override_option("update-poll-interval-ms", overrides.update_poll_interval_ms)?
            .set_override_option("log-dir", overrides.log_dir.clone())?;

        let config: PmmConfig = builder
            .build()
            .with_context(|| format!("Cannot read '{}' config file", config_path))?
            .try_deserialize()
            .with_context(|| format!("Cannot parse '{}' config file", config_path))?;

        debug!("loaded configuration: {:?}", config);
        Ok(config)
    }
}
