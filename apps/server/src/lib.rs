//! # Backoffice Server
//!
//! Serves the backoffice feature slices over HTTP (or HTTPS when `[server.ssl]` is set).
//!
//! ## Example
//! ```no_run
//! use bo_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .site_root("/var/www/site")
//!         .port(4583)
//!         .build()?
//!         .run()
//!         .await
//! }
//! ```

mod router;
mod shutdown;
mod tls;

use anyhow::{Context, Result};
use axum::Router;
use axum_server::Handle;
use backoffice::domain::config::ApiConfig;
use backoffice::domain::constants::{CORE_TOURS_DIR, PLUGINS_DIR};
use backoffice::kernel::server::ApiState;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// In-flight requests get this long to finish after a shutdown signal.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
}

impl ServerBuilder {
    pub fn config(mut self, cfg: ApiConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    /// Resolves the tour directories against a site root
    /// (`<root>/config/BackOfficeTours` and `<root>/App_Plugins`).
    pub fn site_root(mut self, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        self.cfg.tours.core_path = root.join(CORE_TOURS_DIR);
        self.cfg.tours.plugins_path = root.join(PLUGINS_DIR);
        self
    }

    /// Checks the TLS files, initializes the feature slices and assembles the API state.
    ///
    /// # Errors
    /// Fails on a missing certificate or key, or when a slice rejects its configuration
    /// (e.g. an invalid tour filter pattern).
    pub fn build(self) -> Result<Server> {
        if let Some(ssl) = &self.cfg.server.ssl {
            tls::check(ssl)?;
        }

        let slices = backoffice::init(&self.cfg).context("Platform bootstrap failed")?;
        let state = ApiState::builder()
            .config(self.cfg)
            .register_slices(slices)
            .build()
            .context("Failed to finalize API state registry")?;

        info!(
            tours = %state.config.tours.core_path.display(),
            plugins = %state.config.tours.plugins_path.display(),
            slices = ?state.slice_names().collect::<Vec<_>>(),
            "Backoffice initialized"
        );
        Ok(Server { state })
    }
}

/// An initialized backoffice, ready to serve.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// The full application router, including `/api` docs.
    pub fn router(&self) -> Router {
        router::init(self.state.clone())
    }

    #[must_use]
    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(self.state.config.server.address, self.state.config.server.port)
    }

    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }

    /// Serves until Ctrl+C or SIGTERM, then drains in-flight requests.
    ///
    /// # Errors
    /// Returns an error if the TLS material cannot be loaded or the address cannot be bound.
    pub async fn run(self) -> Result<()> {
        let address = self.address();
        let app = self.router().into_make_service();

        let handle = Handle::<SocketAddr>::new();
        tokio::spawn({
            let handle = handle.clone();
            async move {
                shutdown::requested().await;
                info!(timeout = ?DRAIN_TIMEOUT, "Draining connections");
                handle.graceful_shutdown(Some(DRAIN_TIMEOUT));
            }
        });

        let served = match &self.state.config.server.ssl {
            Some(ssl) => {
                let tls = tls::load(ssl).await?;
                info!("Backoffice listening on https://{address}");
                axum_server::bind_rustls(address, tls).handle(handle).serve(app).await
            },
            None => {
                info!("Backoffice listening on http://{address}");
                axum_server::bind(address).handle(handle).serve(app).await
            },
        };
        served.with_context(|| format!("Backoffice server on {address} failed"))?;

        info!("Backoffice stopped");
        Ok(())
    }
}
