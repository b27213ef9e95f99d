// Docker volume plugin exposing ZFS datasets as named volumes.
//
// Each volume is a child dataset of a configured root dataset. The Docker
// daemon talks to the plugin over a Unix socket using the volume-plugin
// JSON protocol; every dataset operation goes through libzetta.

use clap::Parser;
use std::path::PathBuf;
use tokio::net::UnixListener;
use tokio_stream::wrappers::UnixListenerStream;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod driver;
mod handlers;
mod models;

use driver::ZfsDriver;

/// ZFS volume plugin for Docker
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Root dataset that owns all volumes, e.g. "tank/docker/volumes"
    #[arg(long, env = "ZFS_ROOT_DATASET")]
    dataset: String,

    /// Unix socket the Docker daemon connects to
    #[arg(
        long,
        env = "PLUGIN_SOCKET",
        default_value = "/run/docker/plugins/zfs.sock"
    )]
    socket: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();

    let args = Args::parse();

    info!(
        dataset = %args.dataset,
        version = env!("CARGO_PKG_VERSION"),
        "starting ZFS volume plugin"
    );
    let zfs = ZfsDriver::new(&args.dataset)?;

    if let Some(parent) = args.socket.parent() {
        std::fs::create_dir_all(parent)?;
    }
    // a stale socket from a previous run blocks the bind
    match std::fs::remove_file(&args.socket) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let listener = UnixListener::bind(&args.socket)?;
    info!(socket = %args.socket.display(), "listening for plugin requests");

    warp::serve(handlers::routes(zfs))
        .run_incoming(UnixListenerStream::new(listener))
        .await;

    Ok(())
}
