//! Targets command - manage the configured target list.

use anyhow::Result;
use bannergrab_core::ConfigStore;

pub async fn add(store: &ConfigStore, target: &str) -> Result<()> {
    let added = store.add_target(target).await?;
    println!("Added {}", added);
    Ok(())
}

pub async fn remove(store: &ConfigStore, target: &str) -> Result<()> {
    store.remove_target(target).await?;
    println!("Removed {}", target);
    Ok(())
}

pub async fn list(store: &ConfigStore, json: bool) -> Result<()> {
    let targets = store.get_targets().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&targets)?);
        return Ok(());
    }

    if targets.is_empty() {
        println!("No targets configured.");
        return Ok(());
    }

    for target in &targets {
        println!("{}", target);
    }
    println!("\nTotal: {} targets", targets.len());
    Ok(())
}
