use std::error::Error;

use market_wallboard::{Config, Wallboard};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config = Config::from_env();
    info!(
        base_url = %config.base_url,
        refresh = ?config.refresh,
        dwell = ?config.dwell,
        "market-wallboard starting"
    );

    let mut board = Wallboard::start(config);

    // Log connection-health transitions so an unattended deployment leaves
    // a trail when the upstream flaps
    let mut status_rx = board.connection();
    tokio::spawn(async move {
        while status_rx.changed().await.is_ok() {
            let healthy = *status_rx.borrow();
            info!(healthy, "connection health changed");
        }
    });

    tokio::signal::ctrl_c().await?;
    info!("received Ctrl-C, shutting down");
    board.shutdown();

    Ok(())
}
