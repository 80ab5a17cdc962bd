use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use confidant_api::{AppState, reader};
use confidant_model::NotificationStyle;
use confidant_store::Directory;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "confidant-reader")]
#[command(about = "Confidant read API: browse contacts, memories and statistics")]
struct Cli {
    /// Snapshot file shared with the writer service.
    #[arg(long, default_value = "contacts_data.json")]
    data_file: PathBuf,
    #[arg(long, default_value = "127.0.0.1:5000")]
    listen: SocketAddr,
    /// Reminder register: `formal` or `casual`.
    #[arg(long, default_value = "formal")]
    style: NotificationStyle,
}

#[tokio::main]
async fn main() -> Result<()> {
    confidant_api::init_tracing();

    let cli = Cli::parse();
    let directory = Directory::open(&cli.data_file);
    let existing = directory.current_store().await;
    info!(contacts = existing.count(), style = ?cli.style, "snapshot opened");

    let app = reader::router(AppState::new(directory).with_style(cli.style));
    confidant_api::serve(app, cli.listen, reader::SERVICE, &cli.data_file).await
}
