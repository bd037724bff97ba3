use eyre::Result;
use waveportal_bindings::{IWavePortal, Wave};
use waveportal_config::Config;
use yansi::Paint;

use crate::utils;

/// Prints the wave history, newest first. Read-only; no wallet involved.
pub async fn run(config: Config, json: bool) -> Result<()> {
    let deployment = config.deployment()?;
    let provider = utils::get_provider(&config)?;

    let portal = IWavePortal::new(deployment.address, provider);
    let onchain = portal.getAllWaves().call().await?;
    let total = portal.getTotalWaves().call().await?;

    let mut waves: Vec<Wave> = onchain.into_iter().map(Wave::from).collect();
    waves.reverse();

    if json {
        println!("{}", serde_json::to_string_pretty(&waves)?);
        return Ok(());
    }

    for wave in &waves {
        println!(
            "{}  {}\n  {}",
            wave.local_time().dim(),
            wave.sender.to_string().cyan(),
            wave.message
        );
    }
    println!("\n{} waves total", total);
    Ok(())
}
