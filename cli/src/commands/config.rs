//! Config command - show the effective configuration.

use anyhow::Result;
use bannergrab_core::ConfigStore;

pub async fn show(store: &ConfigStore, json: bool) -> Result<()> {
    let config = store.load().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("Config file:  {}", store.config_path().display());
    println!("Timeout:      {}s", config.timeout_secs);
    println!("Default port: {}", config.default_port);
    println!("Targets:      {}", config.targets.len());
    for target in &config.targets {
        println!("  {}", target);
    }
    Ok(())
}

pub async fn set_timeout(store: &ConfigStore, secs: u64) -> Result<()> {
    store.set_timeout(secs).await?;
    println!("Timeout set to {}s", secs);
    Ok(())
}
