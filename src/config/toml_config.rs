use crate::adapters::Backend;
use crate::utils::error::{Result, TitanicError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub data: DataConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub source: String,
    pub csv_file: Option<String>,
    pub db_file: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TitanicError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration text after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| TitanicError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the value of the environment variable, leaving unknown names as-is.
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn backend(&self) -> Result<Backend> {
        self.data.source.parse()
    }

    /// Location of the store selected by `data.source`.
    pub fn data_location(&self) -> Result<&str> {
        let location = match self.backend()? {
            Backend::Csv => validation::validate_required_field("data.csv_file", &self.data.csv_file)?,
            Backend::Sqlite => validation::validate_required_field("data.db_file", &self.data.db_file)?,
        };
        Ok(location.as_str())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging
            .as_ref()
            .map(|l| l.format.clone())
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.server.host)?;
        validation::validate_range("server.port", self.server.port, 1, u16::MAX)?;

        let field = match self.backend()? {
            Backend::Csv => "data.csv_file",
            Backend::Sqlite => "data.db_file",
        };
        validation::validate_path(field, self.data_location()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[server]
port = 9090

[data]
source = "sqlite"
csv_file = "./data/titanic.csv"
db_file = "./data/titanic.db"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.bind_address(), "127.0.0.1:9090");
        assert_eq!(config.backend().unwrap(), Backend::Sqlite);
        assert_eq!(config.data_location().unwrap(), "./data/titanic.db");
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TITANIC_TEST_CSV", "/srv/titanic.csv");

        let toml_content = r#"
[data]
source = "csv"
csv_file = "${TITANIC_TEST_CSV}"

[logging]
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data_location().unwrap(), "/srv/titanic.csv");
        assert_eq!(config.log_format(), LogFormat::Json);

        std::env::remove_var("TITANIC_TEST_CSV");
    }

    #[test]
    fn test_config_validation() {
        let unknown_source = TomlConfig::from_toml_str("[data]\nsource = \"mongo\"\n").unwrap();
        assert!(unknown_source.validate().is_err());

        let missing_db = TomlConfig::from_toml_str("[data]\nsource = \"sqlite\"\ncsv_file = \"a.csv\"\n").unwrap();
        assert!(matches!(
            missing_db.validate(),
            Err(TitanicError::MissingConfigError { .. })
        ));

        let zero_port =
            TomlConfig::from_toml_str("[server]\nport = 0\n[data]\nsource = \"csv\"\ncsv_file = \"a.csv\"\n").unwrap();
        assert!(zero_port.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[data]\nsource = \"csv\"\ncsv_file = \"titanic.csv\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.backend().unwrap(), Backend::Csv);
    }
}
