//! folio-server - HTTP query API for grounded book question answering.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment files are optional; deployment config may come entirely
    // from real environment variables.
    dotenvy::dotenv().ok();

    // Load configuration
    let config = ServerConfig::load()?;

    // Start server
    server::start_server(config).await?;

    Ok(())
}
