//! Config command handlers

use anyhow::{bail, Result};

use libris_core::Config;

use crate::output::Output;

/// Show the current configuration
pub fn show(output: &Output) -> Result<()> {
    let config = Config::load()?;

    if matches!(output.format, crate::output::OutputFormat::Json) {
        println!(
            "{}",
            serde_json::json!({
                "config_file": Config::config_file_path(),
                "data_dir": config.data_dir,
            })
        );
    } else {
        output.message(&format!(
            "Config file: {}",
            Config::config_file_path().display()
        ));
        output.message(&format!("data_dir:    {}", config.data_dir.display()));
    }

    Ok(())
}

/// Set a configuration value and save it
pub fn set(key: String, value: String, output: &Output) -> Result<()> {
    let mut config = Config::load()?;

    match key.as_str() {
        "data_dir" => config.data_dir = value.into(),
        _ => bail!("Unknown configuration key: {} (expected: data_dir)", key),
    }

    config.save()?;
    output.success(&format!("Set {}", key));

    Ok(())
}
