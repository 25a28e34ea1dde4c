use crate::config::PmmConfig;
use crate::updates::{ProcessLiveness, SystemLiveness, UpdateOrchestrator};
use crate::users::HtpasswdStore;
use axum::http::header::HOST;
use axum::http::HeaderMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct DaemonState {
    orchestrator: Arc<UpdateOrchestrator>,
    users: Arc<HtpasswdStore>,
    route_prefix: Arc<str>,
}

impl DaemonState {
    pub fn new(orchestrator: UpdateOrchestrator, users: HtpasswdStore, route_prefix: &str) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            users: Arc::new(users),
            route_prefix: Arc::from(route_prefix),
        }
    }

    pub fn from_config(config: &PmmConfig) -> Self {
        Self::with_liveness(config, Arc::new(SystemLiveness))
    }

    pub fn with_liveness(config: &PmmConfig, liveness: Arc<dyn ProcessLiveness>) -> Self {
        Self::new(
            UpdateOrchestrator::from_config(config, liveness),
            HtpasswdStore::new(&config.htpasswd_path),
            &config.route_prefix(),
        )
    }

    pub fn orchestrator(&self) -> &UpdateOrchestrator {
        &self.orchestrator
    }

    pub fn users(&self) -> &HtpasswdStore {
        &self.users
    }

    pub fn route_prefix(&self) -> &str {
        &self.route_prefix
    }

    /// Absolute URL of `path` as seen by the caller, built from its `Host` header.
    pub fn location(&self, headers: &HeaderMap, path: &str) -> String {
        let host = headers
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("localhost");
        format!("http://{}{}{}", host, self.route_prefix, path)
    }
}
