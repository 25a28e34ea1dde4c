use crate::config::ConfigOverrides;
use clap::Parser;

/// HTTP control surface for PMM updates and nginx users.
///
/// Every option can also be set in the YAML config file under the same name;
/// the command line wins.
#[derive(Parser, Debug, Clone, Default)]
#[clap(name = "pmm-configurator", version)]
pub struct Cli {
    /// Configuration file location
    #[clap(long)]
    pub config: Option<String>,

    /// htpasswd file location
    #[clap(long)]
    pub htpasswd_path: Option<String>,

    /// Address and port to listen on: [ip_address]:port
    #[clap(long)]
    pub listen_address: Option<String>,

    /// Prefix for the internal routes of web endpoints
    #[clap(long = "url-prefix")]
    pub url_prefix: Option<String>,

    /// authorized_keys file location
    #[clap(long)]
    pub ssh_key_path: Option<String>,

    /// Owner of authorized_keys file
    #[clap(long)]
    pub ssh_key_owner: Option<String>,

    /// Grafana database location
    #[clap(long)]
    pub grafana_db_path: Option<String>,

    /// Prometheus configuration file location
    #[clap(long)]
    pub prometheus_conf_path: Option<String>,

    /// Update directory location, holding log/ and pmm-update.pid
    #[clap(long)]
    pub update_dir_path: Option<String>,

    /// Updater executable
    #[clap(long)]
    pub updater_path: Option<String>,

    /// Argument passed to the updater; repeat for several
    #[clap(long = "updater-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub updater_args: Vec<String>,

    /// How long POST /v1/updates waits for the new update log
    #[clap(long)]
    pub update_timeout_ms: Option<u64>,

    /// How often the update log directory is checked while waiting
    #[clap(long)]
    pub update_poll_interval_ms: Option<u64>,

    /// Directory for configurator.log; stderr only when unset
    #[clap(long)]
    pub log_dir: Option<String>,

    /// Write the merged configuration back to the config file before serving
    #[clap(long)]
    pub save_config: bool,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config: self.config.clone(),
            htpasswd_path: self.htpasswd_path.clone(),
            listen_address: self.listen_address.clone(),
            url_prefix: self.url_prefix.clone(),
            ssh_key_path: self.ssh_key_path.clone(),
            ssh_key_owner: self.ssh_key_owner.clone(),
            grafana_db_path: self.grafana_db_path.clone(),
            prometheus_conf_path: self.prometheus_conf_path.clone(),
            update_dir_path: self.update_dir_path.clone(),
            updater_path: self.updater_path.clone(),
            updater_args: (!self.updater_args.is_empty()).then(|| self.updater_args.clone()),
            update_timeout_ms: self.update_timeout_ms,
            update_poll_interval_ms: self.update_poll_interval_ms,
            log_dir: self.log_dir.clone(),
        }
    }
}
