//! apistep - Main Entry Point
//!
//! Reads `APISTEP_*` settings, installs the environment and runs the
//! feature files given by `--features`.

use apistep::{Environment, init_tracing, run};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    tracing::info!("Starting apistep v{}", env!("CARGO_PKG_VERSION"));

    Environment::from_env()?.install()?;
    run().await;

    Ok(())
}
