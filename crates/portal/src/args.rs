use clap::Parser;
use eyre::Result;
use waveportal_config::Config;

use crate::{
    cmd, handler,
    opts::{Waveportal, WaveportalSubcommand},
    utils,
};

/// Run the `waveportal` command-line interface.
pub fn run() -> Result<()> {
    setup()?;

    let args = Waveportal::parse();
    utils::tokio_runtime()?.block_on(run_command(args))
}

/// Setup the global error handler and logger.
pub fn setup() -> Result<()> {
    handler::install();
    utils::subscriber();

    Ok(())
}

/// Run the subcommand.
pub async fn run_command(args: Waveportal) -> Result<()> {
    let mut config = Config::load()?;
    args.rpc.apply(&mut config);

    match args.cmd {
        WaveportalSubcommand::Open { port, no_browser } => {
            if let Some(port) = port {
                config.port = port;
            }
            if no_browser {
                config.open_browser = false;
            }
            cmd::open::run(config).await
        }
        WaveportalSubcommand::Waves { json } => cmd::waves::run(config, json).await,
        WaveportalSubcommand::Total => cmd::total::run(config).await,
    }
}
