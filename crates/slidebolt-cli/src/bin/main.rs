//! slidebolt CLI entry point

use anyhow::Result;

fn main() -> Result<()> {
    // Pipeline warnings come through the log crate; show them by default
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    slidebolt_cli::run_cli()
}
