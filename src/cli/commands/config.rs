use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::fs;

/// Inspect the YAML configuration file.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        if *print_config {
            let path = Config::config_file();
            match fs::read_to_string(&path) {
                Ok(content) => {
                    info(format!("Configuration file: {}", path.display()));
                    println!("{content}");
                }
                Err(_) => {
                    warning("No configuration file found; showing effective defaults:");
                    println!("database: {}", cfg.database);
                    println!("default_channel: {}", cfg.default_channel);
                }
            }
            return Ok(());
        }

        if *check {
            let path = Config::config_file();
            if !path.exists() {
                warning("Configuration file not found. Run `rvotetally init` to create it.");
                return Ok(());
            }
            let content = fs::read_to_string(&path)?;
            match serde_yaml::from_str::<Config>(&content) {
                Ok(_) => success("Configuration file is valid."),
                Err(e) => warning(format!("Configuration file has problems: {e}")),
            }
            return Ok(());
        }

        info("Use `config --print` or `config --check`.");
    }

    Ok(())
}
