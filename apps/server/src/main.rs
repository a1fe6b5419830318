use anyhow::Context;
use backoffice::domain::config::ApiConfig;
use backoffice::kernel::config::{DEFAULT_CONFIG_PATH, load_config};
use bo_logger::Logger;
use bo_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig = load_config(Some(DEFAULT_CONFIG_PATH))
        .context("Critical: Configuration is malformed")?;

    let _log = Logger::builder(env!("CARGO_PKG_NAME")).with_config(&cfg.logging)?.init()?;

    Server::builder().config(cfg).build()?.run().await
}
