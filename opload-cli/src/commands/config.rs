use anyhow::{anyhow, Context, Result};
use opload_config::{ConfigLoader, OploadConfig};
use std::fs;
use std::path::Path;
use tracing::{error, info};

pub fn handle_config_validate(config_file: &Path) -> Result<()> {
    info!("Validating configuration file: {:?}", config_file);

    if !config_file.exists() {
        return Err(anyhow!("Configuration file not found: {:?}", config_file));
    }

    match ConfigLoader::new().from_file(config_file) {
        Ok(_) => {
            println!("Configuration file is valid");
            Ok(())
        }
        Err(e) => {
            error!("Configuration validation failed: {}", e);
            Err(e).context("Configuration validation failed")
        }
    }
}

pub fn handle_config_generate(output: Option<&Path>, force: bool) -> Result<()> {
    let sample = OploadConfig::generate_sample();

    let Some(output) = output else {
        print!("{}", sample);
        return Ok(());
    };

    if output.exists() && !force {
        return Err(anyhow!(
            "Output file already exists: {:?}. Use --force to overwrite.",
            output
        ));
    }
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Failed to create output directory")?;
    }
    fs::write(output, sample).with_context(|| format!("Failed to write {:?}", output))?;

    println!("Configuration written to {:?}", output);
    Ok(())
}
