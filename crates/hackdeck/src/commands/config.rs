use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::{Config, KEYS};

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    println!("{} {}", "Config file:".bold(), path.display());

    let config = if path.exists() {
        Config::load_from(&path)?
    } else {
        println!("{}", "(not created yet, showing defaults)".dimmed());
        Config::default()
    };

    let defaults = config.defaults.unwrap_or_default();
    let rows = [
        (KEYS[0], defaults.theme.unwrap_or_else(|| "dark".to_string())),
        (
            KEYS[1],
            defaults.transition.unwrap_or_else(|| "slide".to_string()),
        ),
        (
            KEYS[2],
            defaults
                .start_slide
                .map_or_else(|| "1".to_string(), |n| n.to_string()),
        ),
        (
            KEYS[3],
            defaults
                .assets_dir
                .map_or_else(|| "assets".to_string(), |p| p.display().to_string()),
        ),
    ];
    println!();
    for (key, value) in rows {
        println!("  {:<22} {}", key.cyan(), value);
    }
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let path = Config::path()?;
    let mut config = if path.exists() {
        Config::load_from(&path)?
    } else {
        Config::default()
    };
    config.set(key, value)?;
    let saved = config.save()?;
    println!(
        "{} {} = {} ({})",
        "Saved".green().bold(),
        key,
        value,
        saved.display()
    );
    Ok(())
}
