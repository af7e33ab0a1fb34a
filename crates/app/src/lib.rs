//! apistep - Gherkin steps for HTTP API testing
//!
//! Wires the step registry into a cucumber runner:
//! - [`Environment`] holds settings, the registry and the adapters
//! - [`ApiWorld`] forwards every Given/When/Then step to the registry
//! - [`run`] parses the command line and runs the feature files

pub mod cli;
pub mod environment;
pub mod world;

use cucumber::{World, cli as cucumber_cli};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub use cli::CustomOpts;
pub use environment::Environment;
pub use world::{ApiWorld, reset_world};

/// Installs a tracing subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Runs the features named on the command line against the installed
/// environment and exits with the runner's status.
pub async fn run() {
    let opts = cucumber_cli::Opts::<_, _, _, CustomOpts>::parsed();
    let features = opts.custom.features.clone();
    ApiWorld::cucumber()
        .before(reset_world)
        .with_cli(opts)
        .run_and_exit(features)
        .await;
}
