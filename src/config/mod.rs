pub mod toml_config;

pub use toml_config::{LogFormat, TomlConfig};

#[cfg(feature = "cli")]
use clap::Parser;

/// Command-line flags of the API server; anything set here overrides the TOML file.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "titanic-api")]
#[command(about = "Query API over the Titanic passenger dataset")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Override data.source (csv or sqlite)
    #[arg(long)]
    pub source: Option<String>,

    /// Override server.port
    #[arg(long)]
    pub port: Option<u16>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(source) = &self.source {
            config.data.source = source.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}
