use crate::daemon::routes::ROUTES;
use crate::daemon::state::DaemonState;
use anyhow::Context;
use axum::Router;
use std::io;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// All routes, mounted under the configured prefix.
pub fn get_router(state: DaemonState) -> Router {
    let mut api = Router::new();
    for (path, method_router) in ROUTES.iter() {
        api = api.route(path, method_router.clone());
    }

    let prefix = state.route_prefix().to_string();
    let api = api.with_state(state);
    if prefix.is_empty() {
        api
    } else {
        Router::new().nest(&prefix, api)
    }
}

pub struct DaemonServer {
    state: DaemonState,
    listener: TcpListener,
}

impl DaemonServer {
    pub async fn bind(listen_address: &str, state: DaemonState) -> anyhow::Result<Self> {
        let addr: SocketAddr = listen_address
            .parse()
            .with_context(|| format!("Invalid listen address {listen_address}"))?;

        match TcpListener::bind(addr).await {
            Ok(listener) => Ok(Self { state, listener }),
            Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
                anyhow::bail!(
                    "Failed to start configurator: port {} is already in use",
                    addr.port()
                )
            }
            Err(e) => anyhow::bail!("Failed to bind to address {}: {}", addr, e),
        }
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves until `cancellation_token` fires, then drains in-flight requests.
    ///
    /// Updaters spawned by earlier requests keep running after this returns.
    pub async fn run(self, cancellation_token: CancellationToken) -> anyhow::Result<()> {
        let addr = self.local_addr()?;
        let router = get_router(self.state);

        info!("configurator listening on {}", addr);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(cancellation_token.cancelled_owned())
            .await
            .context("server error")?;

        info!("configurator stopped");
        Ok(())
    }
}
