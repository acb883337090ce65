//! Entry point for the Pajak Engine binary.
//!
//! Running this binary starts an HTTP server exposing the tax
//! calculators.  The bind address is taken from `PAJAK_BIND_ADDR`
//! (default `127.0.0.1:3000`).  Logging honours `RUST_LOG`, falling
//! back to `PAJAK_LOG` and then `info`.

use pajak_engine::config::ServerConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    if let Err(err) = pajak_engine::api::serve(&config).await {
        tracing::error!("server terminated: {err:#}");
        return Err(err);
    }
    Ok(())
}
