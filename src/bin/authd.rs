//! Auth Server Binary
//!
//! Resolves configuration, seeds the administrator, and serves the
//! authentication API until interrupted.

use clap::Parser;
use rmshop_auth::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    log(config.log_level, config.log_dir.as_deref())?;
    run(config).await
}
