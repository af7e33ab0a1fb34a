//! Cucumber runner for the bundled feature files.
//!
//! Starts the mock API, installs an environment pointing at it and runs
//! every scenario under `tests/features` through the real step registry.

mod common;

use std::path::Path;

use apistep::{ApiWorld, Environment, reset_world};
use apistep_application::Settings;
use apistep_application::settings::{ENV_JSON_SCHEMA_DIR, ENV_MY_APP_URL};
use apistep_infrastructure::default_collaborators;
use cucumber::World;

#[tokio::main]
async fn main() {
    let base_url = common::spawn_server().await;
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let settings = Settings::from_vars(
        manifest_dir,
        [
            (ENV_MY_APP_URL, base_url.as_str()),
            (ENV_JSON_SCHEMA_DIR, "tests/schemas"),
            ("APISTEP_VAR_USER_ID", "42"),
        ],
    );
    let collaborators = default_collaborators(&settings).expect("Failed to build collaborators");
    Environment::new(settings, collaborators)
        .expect("Failed to build environment")
        .install()
        .expect("Failed to install environment");

    ApiWorld::cucumber()
        .before(reset_world)
        .fail_on_skipped()
        .run_and_exit(manifest_dir.join("tests/features"))
        .await;
}
