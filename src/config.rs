//! Command-line arguments and run configuration.

use crate::domain::errors::{ExportError, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;

/// Routine invoked before extraction unless the config file overrides it.
pub const DEFAULT_PREPARE_ROUTINE: &str = "before_forecast_export";

/// Command-line arguments. All eight positions are required; clap prints
/// the usage text and exits non-zero when any is missing.
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Exports SQL tables as TSV files and uploads them to an FTP destination"
)]
pub struct CliArgs {
    /// Host name of the source SQL server
    pub source_host: String,
    /// Database name
    pub database: String,
    /// Login for the source database
    pub login: String,
    /// Password for the source database
    pub password: String,
    /// Host name of the destination FTP server
    pub dest_host: String,
    /// Folder on the destination server; pass "" for the root folder
    pub dest_folder: String,
    /// Login for the destination server
    pub dest_login: String,
    /// Password for the destination server
    pub dest_password: String,

    /// Path to a configuration file (YAML or JSON) with export jobs
    #[arg(short, long)]
    pub config: Option<String>,
}

/// One export unit: a query and the file name it is uploaded under.
#[derive(Debug, Deserialize, Clone)]
pub struct ExportJob {
    pub name: String,
    pub query: String,
    pub remote_name: String,
}

/// Connection settings for the source database.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub login: String,
    pub password: String,
}

/// Connection settings for the FTP destination.
#[derive(Debug, Clone)]
pub struct DestinationConfig {
    pub host: String,
    pub folder: String,
    pub login: String,
    pub password: String,
}

/// Optional file-provided settings merged over the defaults.
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub source_port: Option<u16>,
    pub prepare_routine: Option<String>,
    pub jobs: Option<Vec<ExportJob>>,
}

/// The fully resolved configuration an export run operates on.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub destination: DestinationConfig,
    pub prepare_routine: Option<String>,
    pub jobs: Vec<ExportJob>,
}

impl FileConfig {
    /// Loads a YAML or JSON configuration file, chosen by extension.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        let config: FileConfig = if path.ends_with(".json") {
            serde_json::from_str(&contents)
                .map_err(|e| ExportError::Config(format!("{}: {}", path, e)))?
        } else {
            serde_yaml::from_str(&contents)
                .map_err(|e| ExportError::Config(format!("{}: {}", path, e)))?
        };

        Ok(config)
    }
}

impl AppConfig {
    /// Resolves CLI arguments plus the optional config file into the final
    /// run configuration.
    pub fn resolve(args: &CliArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };

        let config = Self {
            source: SourceConfig {
                host: args.source_host.clone(),
                port: file.source_port.unwrap_or(5432),
                database: args.database.clone(),
                login: args.login.clone(),
                password: args.password.clone(),
            },
            destination: DestinationConfig {
                host: args.dest_host.clone(),
                folder: args.dest_folder.clone(),
                login: args.dest_login.clone(),
                password: args.dest_password.clone(),
            },
            prepare_routine: file
                .prepare_routine
                .or_else(|| Some(DEFAULT_PREPARE_ROUTINE.to_string())),
            jobs: file.jobs.unwrap_or_else(default_jobs),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.jobs.is_empty() {
            return Err(ExportError::Config("job list is empty".into()));
        }
        for job in &self.jobs {
            if job.query.trim().is_empty() {
                return Err(ExportError::Config(format!(
                    "job {} has an empty query",
                    job.name
                )));
            }
            if job.remote_name.trim().is_empty() {
                return Err(ExportError::Config(format!(
                    "job {} has an empty remote file name",
                    job.name
                )));
            }
        }
        Ok(())
    }
}

/// The two exports every run performs unless a config file says otherwise.
pub fn default_jobs() -> Vec<ExportJob> {
    vec![
        ExportJob {
            name: "items".into(),
            query: "SELECT * FROM items ORDER BY id".into(),
            remote_name: "items.tsv".into(),
        },
        ExportJob {
            name: "orders".into(),
            query: "SELECT * FROM orders ORDER BY id".into(),
            remote_name: "orders.tsv".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn cli(config: Option<&str>) -> CliArgs {
        let mut argv = vec![
            "sqltotsv",
            "sql.example.com",
            "sales",
            "reader",
            "secret",
            "files.example.com",
            "inbox",
            "ftp-user",
            "ftp-pass",
        ];
        if let Some(path) = config {
            argv.push("--config");
            argv.push(path);
        }
        CliArgs::parse_from(argv)
    }

    #[test]
    fn test_missing_positional_args_are_rejected() {
        let result = CliArgs::try_parse_from(["sqltotsv", "host", "db", "user"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_defaults() {
        let config = AppConfig::resolve(&cli(None)).unwrap();

        assert_eq!(config.source.host, "sql.example.com");
        assert_eq!(config.source.port, 5432);
        assert_eq!(config.destination.folder, "inbox");
        assert_eq!(
            config.prepare_routine.as_deref(),
            Some(DEFAULT_PREPARE_ROUTINE)
        );
        assert_eq!(config.jobs.len(), 2);
        assert_eq!(config.jobs[0].name, "items");
        assert_eq!(config.jobs[1].remote_name, "orders.tsv");
    }

    #[test]
    fn test_resolve_with_yaml_file() {
        let yaml = r#"
source_port: 5433
prepare_routine: "refresh_forecast_inputs"
jobs:
  - name: "stock"
    query: "SELECT * FROM stock ORDER BY sku"
    remote_name: "stock.tsv"
"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", yaml).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = AppConfig::resolve(&cli(Some(&path))).unwrap();

        assert_eq!(config.source.port, 5433);
        assert_eq!(
            config.prepare_routine.as_deref(),
            Some("refresh_forecast_inputs")
        );
        assert_eq!(config.jobs.len(), 1);
        assert_eq!(config.jobs[0].remote_name, "stock.tsv");
    }

    #[test]
    fn test_resolve_with_json_file() {
        let json = r#"{"jobs": [{"name": "items", "query": "SELECT 1", "remote_name": "i.tsv"}]}"#;
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .unwrap();
        write!(file, "{}", json).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = AppConfig::resolve(&cli(Some(&path))).unwrap();
        assert_eq!(config.jobs.len(), 1);
        assert_eq!(config.jobs[0].name, "items");
    }

    #[test]
    fn test_empty_job_list_is_rejected() {
        let yaml = "jobs: []";
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", yaml).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let result = AppConfig::resolve(&cli(Some(&path)));
        assert!(matches!(result, Err(ExportError::Config(_))));
    }
}
