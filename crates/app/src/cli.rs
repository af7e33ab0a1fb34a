//! Command line options added on top of cucumber's own.

use std::path::PathBuf;

/// Extra options for the `apistep` binary.
///
/// Cucumber contributes the usual runner flags (`--name`, `--tags`,
/// `--concurrency`, `--fail-fast`, ...).
#[derive(Debug, Clone, clap::Args)]
pub struct CustomOpts {
    /// A `.feature` file or a directory searched for them.
    #[arg(long, value_name = "PATH", default_value = "features")]
    pub features: PathBuf,
}
