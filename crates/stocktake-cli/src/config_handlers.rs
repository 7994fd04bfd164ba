//! Handler functions for config CLI commands.

use std::path::{Path, PathBuf};

use stocktake_core::config::PROJECT_NAME;
use stocktake_core::{Error, Result, StocktakeConfig};

use crate::cli::ConfigAction;

/// Handle a config subcommand.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Init { force } => {
            let path = target_path(config_path)?;
            cmd_config_init(&path, force)?;
            println!("Config file created at {}", path.display());
            Ok(())
        }
        ConfigAction::Show => {
            let config = StocktakeConfig::load(config_path)?;
            print!("{}", render_config(&config)?);
            Ok(())
        }
    }
}

fn target_path(config_path: Option<&str>) -> Result<PathBuf> {
    StocktakeConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory for this platform"))
}

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    let path = target_path(config_path)?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!("(file does not exist; run `{PROJECT_NAME} config init` to create it)");
    }
    Ok(())
}

/// Write a default configuration file at `path`.
pub fn cmd_config_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = StocktakeConfig::default().to_toml_string()?;
    std::fs::write(path, toml_str).map_err(|e| Error::io_with_path(e, path))?;
    log::info!("Wrote default config to {}", path.display());
    Ok(())
}

/// Effective configuration as TOML, with the JWT secret masked.
pub fn render_config(config: &StocktakeConfig) -> Result<String> {
    config.redacted().to_toml_string()
}
