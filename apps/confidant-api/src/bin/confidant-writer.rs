use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use confidant_api::{AppState, writer};
use confidant_store::Directory;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "confidant-writer")]
#[command(about = "Confidant write API: create contacts and record memories")]
struct Cli {
    /// Snapshot file shared with the reader service.
    #[arg(long, default_value = "contacts_data.json")]
    data_file: PathBuf,
    #[arg(long, default_value = "127.0.0.1:5001")]
    listen: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    confidant_api::init_tracing();

    let cli = Cli::parse();
    let directory = Directory::open(&cli.data_file);
    let existing = directory.current_store().await;
    info!(contacts = existing.count(), "snapshot opened");

    let app = writer::router(AppState::new(directory));
    confidant_api::serve(app, cli.listen, writer::SERVICE, &cli.data_file).await
}
