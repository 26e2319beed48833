use clap::{Args, Subcommand};
use std::fs;
use std::io::Write;

use super::OutputFormat;
use crate::config::Config;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init,
}

const DEFAULT_CONFIG: &str = r#"# articlesync configuration

# Path to the managed collection file
# (default: platform data dir, e.g. ~/.local/share/articlesync/collection.json)
# collection_path: collection.json

api:
  # Articles endpoint
  # url: https://brain-stg.rotobot.ai/v1/articles

  # Bearer token. Prefer the ARTICLESYNC_API_TOKEN environment variable.
  # token: ...
"#;

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        println!(
                            "collection_path: {}",
                            config.collection_path.value.display()
                        );
                        println!("  source: {}", config.collection_path.source);
                        println!();

                        println!("api.url: {}", config.api.endpoint());
                        println!(
                            "api.token: {}",
                            if config.api.token.is_some() {
                                "<redacted>"
                            } else {
                                "(not set)"
                            }
                        );
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Init => {
                let config_path = Config::default_config_path();

                // Check if config already exists
                if config_path.exists() {
                    println!("Config file already exists: {}", config_path.display());
                    println!("Use 'articlesync config show' to view current configuration.");
                    return Ok(());
                }

                // Create parent directory
                if let Some(parent) = config_path.parent() {
                    fs::create_dir_all(parent)?;
                }

                let mut file = fs::File::create(&config_path)?;
                file.write_all(DEFAULT_CONFIG.as_bytes())?;

                println!("Created config file: {}", config_path.display());
                println!("\nEdit this file to customize your settings.");
                Ok(())
            }
        }
    }
}
