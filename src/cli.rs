//! Command-line flags and how they override the config file.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(
    name = "scanreport",
    version,
    about = "Upload a medical image and get an AI-generated diagnostic report"
)]
pub struct Cli {
    /// Config file path (default: ~/.config/scanreport/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the bind address (host:port)
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Override the model name
    #[arg(long, value_name = "NAME")]
    pub model: Option<String>,

    /// Validate the configuration, print a summary and exit
    #[arg(long)]
    pub check_config: bool,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::config_path)
    }

    /// Apply flag overrides on top of a loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(bind) = &self.bind {
            config.server.bind_addr = bind.clone();
        }
        if let Some(model) = &self.model {
            config.model.model = model.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_file_values() {
        let cli = Cli::parse_from(["scanreport", "--bind", "0.0.0.0:9000", "--model", "gemini-2.5-flash"]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.server.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.model.model, "gemini-2.5-flash");
    }

    #[test]
    fn no_flags_keep_config() {
        let cli = Cli::parse_from(["scanreport"]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.server.bind_addr, "127.0.0.1:8501");
        assert_eq!(config.model.model, "gemini-2.5-pro");
        assert!(!cli.check_config);
    }

    #[test]
    fn explicit_config_path_is_used() {
        let cli = Cli::parse_from(["scanreport", "--config", "/tmp/custom.toml"]);
        assert_eq!(cli.config_path(), PathBuf::from("/tmp/custom.toml"));
    }
}
