use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

use crate::config::Config;

pub async fn show_config(path: &Path) -> Result<()> {
    let config = Config::load_from(path)?;
    let config_str = toml::to_string_pretty(&config)?;

    println!("Current Configuration ({})", path.display());
    println!("────────────────────────────────");
    println!();
    println!("{}", config_str);

    Ok(())
}

pub async fn edit_config(path: &Path) -> Result<()> {
    if !path.exists() {
        Config::default().save_to(path)?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());

    Command::new(&editor)
        .arg(path)
        .status()
        .with_context(|| format!("Failed to launch editor {}", editor))?;

    // Reject a file we would not be able to load next time
    Config::load_from(path).context("Edited configuration is invalid")?;

    println!("✓ Configuration saved!");

    Ok(())
}

pub async fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!("Configuration file already exists at: {}", path.display());
        println!("Use --force to overwrite");
        return Ok(());
    }

    Config::default().save_to(path)?;

    println!("✓ Configuration initialized at: {}", path.display());
    println!();
    println!("You can edit it with: revive config edit");

    Ok(())
}
