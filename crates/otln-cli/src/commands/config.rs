//! Config command handlers

use anyhow::{bail, Context, Result};

use otln_core::Config;

use crate::output::Output;

/// Show the current configuration
pub fn show(output: &Output) -> Result<()> {
    let config = Config::load()?;

    if output.is_json() {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        println!("Config file: {}", Config::config_file_path().display());
        println!();
        print!("{}", toml::to_string_pretty(&config)?);
    }
    Ok(())
}

/// Set a configuration value and persist it
pub fn set(key: String, value: String, output: &Output) -> Result<()> {
    let mut config = Config::load()?;

    match key.as_str() {
        "canvas_width" => config.canvas_width = parse_units(&key, &value)?,
        "canvas_height" => config.canvas_height = parse_units(&key, &value)?,
        "item_gap" => config.item_gap = parse_units(&key, &value)?,
        "data_dir" => config.data_dir = value.clone().into(),
        "log_file" => {
            config.log_file = if value.is_empty() {
                None
            } else {
                Some(value.clone().into())
            }
        }
        _ => bail!(
            "Unknown config key '{}'. Valid keys: canvas_width, canvas_height, item_gap, data_dir, log_file",
            key
        ),
    }

    config.save()?;
    output.success(&format!("Set {} = {}", key, value));
    Ok(())
}

fn parse_units(key: &str, value: &str) -> Result<f64> {
    value
        .parse()
        .with_context(|| format!("'{}' is not a number for {}", value, key))
}
