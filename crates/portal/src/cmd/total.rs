use eyre::Result;
use waveportal_bindings::IWavePortal;
use waveportal_config::Config;

use crate::utils;

/// Prints the total number of waves ever recorded.
pub async fn run(config: Config) -> Result<()> {
    let deployment = config.deployment()?;
    let provider = utils::get_provider(&config)?;

    let portal = IWavePortal::new(deployment.address, provider);
    let total = portal.getTotalWaves().call().await?;
    println!("{total}");
    Ok(())
}
