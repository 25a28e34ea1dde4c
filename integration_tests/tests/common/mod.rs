#![allow(dead_code)]

use pmm_configurator::config::PmmConfig;
use pmm_configurator::daemon::{DaemonServer, DaemonState};
use pmm_configurator::updates::ProcessLiveness;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub const PREFIX: &str = "/configurator";

/// Treats a fixed set of pids as running, everything else as gone.
pub struct FakeLiveness(pub HashSet<u32>);

impl ProcessLiveness for FakeLiveness {
    fn is_alive(&self, pid: u32) -> bool {
        self.0.contains(&pid)
    }
}

pub struct TestServerBuilder {
    dir: TempDir,
    config: PmmConfig,
    alive: HashSet<u32>,
}

impl TestServerBuilder {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("update").join("log")).unwrap();

        let config = PmmConfig {
            config: dir.path().join("pmm-manage.yml"),
            htpasswd_path: dir.path().join(".htpasswd"),
            listen_address: "127.0.0.1:0".to_string(),
            url_prefix: PREFIX.to_string(),
            update_dir_path: dir.path().join("update"),
            updater_path: PathBuf::from("/bin/sh"),
            update_timeout_ms: 2000,
            update_poll_interval_ms: 20,
            ..PmmConfig::default()
        };

        Self {
            dir,
            config,
            alive: HashSet::new(),
        }
    }

    /// Runs `script` through `/bin/sh` on every `POST /v1/updates`.
    pub fn updater_script(mut self, script: &str) -> Self {
        let path = self.dir.path().join("fake-update.sh");
        fs::write(&path, script).unwrap();
        self.config.updater_args = vec![path.to_string_lossy().into_owned()];
        self
    }

    pub fn alive(mut self, pid: u32) -> Self {
        self.alive.insert(pid);
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.config.update_timeout_ms = timeout_ms;
        self
    }

    pub fn dir(&self) -> &std::path::Path {
        self.dir.path()
    }

    pub async fn start(self) -> TestServer {
        let state = DaemonState::with_liveness(&self.config, Arc::new(FakeLiveness(self.alive)));
        let server = DaemonServer::bind(&self.config.listen_address, state)
            .await
            .unwrap();
        let addr = server.local_addr().unwrap();

        let token = CancellationToken::new();
        let handle = tokio::spawn({
            let token = token.clone();
            async move { server.run(token).await.map_err(|err| err.to_string()) }
        });

        TestServer {
            dir: self.dir,
            base_url: format!("http://{addr}{PREFIX}"),
            client: reqwest::Client::new(),
            token,
            handle,
        }
    }
}

/// A configurator bound to an ephemeral loopback port over a scratch update dir.
pub struct TestServer {
    pub dir: TempDir,
    pub base_url: String,
    pub client: reqwest::Client,
    token: CancellationToken,
    handle: JoinHandle<Result<(), String>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.dir.path().join("update").join("log")
    }

    pub fn pid_file(&self) -> PathBuf {
        self.dir.path().join("update").join("pmm-update.pid")
    }

    pub fn htpasswd(&self) -> PathBuf {
        self.dir.path().join(".htpasswd")
    }

    pub fn log_path(&self, timestamp: &str) -> PathBuf {
        self.log_dir().join(format!("pmm-update__{timestamp}.log"))
    }

    pub fn write_log(&self, timestamp: &str, content: &str) {
        fs::write(self.log_path(timestamp), content).unwrap();
    }

    pub async fn shutdown(self) {
        let TestServer {
            client,
            token,
            handle,
            ..
        } = self;
        // idle keep-alive connections would hold up the graceful drain
        drop(client);
        token.cancel();
        handle.await.unwrap().unwrap();
    }
}

/// Checks the `{code, status, title, detail}` envelope and hands it back.
pub async fn envelope(response: reqwest::Response, code: u16, title: &str) -> serde_json::Value {
    assert_eq!(response.status().as_u16(), code);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], code);
    assert_eq!(body["title"], title);
    assert!(body["status"].is_string());
    assert!(body["detail"].is_string());
    body
}
