//! Config command - inspect and edit the JSON configuration file.
//!
//! Keys are dotted paths into the serialized config, e.g.
//! `segmentation.chapter_token`.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;
use tracing::debug;

use scentrules_core::RulebookConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one value (e.g., "segmentation.min_content_chars")
    Get { key: String },

    /// Change one value; JSON literals are parsed, anything else is a string
    Set { key: String, value: String },

    /// Print the configuration file location
    Path,
}

pub fn run(args: ConfigArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let path = config_path.map_or_else(default_config_path, Path::to_path_buf);

    match args.command {
        ConfigCommand::Show => {
            let config = load_or_default(&path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force to replace it)", path.display());
            }
            save(&path, &RulebookConfig::default())?;
            eprintln!("{} Wrote defaults to {}", style("✓").green(), path.display());
        }
        ConfigCommand::Get { key } => {
            let json = serde_json::to_value(load_or_default(&path)?)?;
            let value = json
                .pointer(&json_pointer(&key))
                .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))?;
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        ConfigCommand::Set { key, value } => {
            let config = assign(&load_or_default(&path)?, &key, &value)?;
            save(&path, &config)?;
            eprintln!("{} {} updated in {}", style("✓").green(), key, path.display());
        }
        ConfigCommand::Path => {
            println!("{}", path.display());
            if !path.exists() {
                eprintln!(
                    "{} not created yet; run 'scentrules config init'",
                    style("ℹ").blue()
                );
            }
        }
    }

    Ok(())
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scentrules")
        .join("config.json")
}

/// Load the configuration used by other commands.
///
/// An explicitly named file must exist. Without one, the default location
/// is used when present, otherwise built-in defaults apply.
pub fn load(config_path: Option<&Path>) -> anyhow::Result<RulebookConfig> {
    match config_path {
        Some(path) => RulebookConfig::from_file(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e)),
        None => load_or_default(&default_config_path()),
    }
}

fn load_or_default(path: &Path) -> anyhow::Result<RulebookConfig> {
    if path.exists() {
        debug!("Using config file {}", path.display());
        Ok(RulebookConfig::from_file(path)?)
    } else {
        Ok(RulebookConfig::default())
    }
}

fn save(path: &Path, config: &RulebookConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;
    Ok(())
}

fn json_pointer(key: &str) -> String {
    format!("/{}", key.replace('.', "/"))
}

/// Return `config` with the value at `key` replaced. Only existing keys can be
/// set, and the result must still deserialize as a config.
fn assign(config: &RulebookConfig, key: &str, raw: &str) -> anyhow::Result<RulebookConfig> {
    let value: Value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));

    let mut json = serde_json::to_value(config)?;
    let slot = json
        .pointer_mut(&json_pointer(key))
        .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))?;
    *slot = value;

    serde_json::from_value(json).map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))
}
