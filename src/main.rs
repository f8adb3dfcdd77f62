use clap::Parser;
use tracing::info;

use third_place_atlas::config::Config;
use third_place_atlas::{logging, server};

#[derive(Parser)]
#[command(name = "third-place-atlas")]
#[command(about = "Map-based directory API for calm, welcoming third places")]
#[command(version = "0.1.0")]
struct Cli {
    /// Port to run the server on (overrides atlas.toml)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables (LIBSQL_URL / LIBSQL_AUTH_TOKEN select
    // the hosted backend when present)
    dotenv::dotenv().ok();

    logging::init_logging();

    let mut config = Config::load()?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    info!("Starting Third-Place Atlas API");
    println!("🗺️  Third-Place Atlas API on port {}...", config.server.port);
    println!("   Places:  http://localhost:{}/places", config.server.port);
    println!("   Health:  http://localhost:{}/health", config.server.port);

    server::start_server(config).await?;

    Ok(())
}
