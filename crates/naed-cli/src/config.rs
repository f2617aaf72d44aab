//! Settings resolution: command line, then config file, then defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use naed_core::{DEFAULT_NORM_TABLE, DEFAULT_TABLE};
use serde::Deserialize;

/// Env var naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "NAED_CONFIG";

pub const DEFAULT_DB: &str = "ddp.db";
pub const DEFAULT_WIDTH: usize = 20;
pub const DEFAULT_CELL: usize = 7;

/// Optional keys of a `naed.toml` file.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub db: Option<PathBuf>,
    pub tables: Option<Vec<String>>,
    pub norm: Option<String>,
    pub width: Option<usize>,
    pub cell: Option<usize>,
}

/// Values given on the command line; `None` defers to the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub db: Option<PathBuf>,
    pub tables: Option<Vec<String>>,
    pub norm: Option<String>,
    pub width: Option<usize>,
    pub cell: Option<usize>,
}

#[derive(Debug, PartialEq)]
pub struct Settings {
    pub db: PathBuf,
    pub tables: Vec<String>,
    pub norm: String,
    pub width: usize,
    pub cell: usize,
}

impl Settings {
    pub fn resolve(cli: Overrides, file: FileConfig) -> Result<Self> {
        let tables: Vec<String> = cli
            .tables
            .or(file.tables)
            .unwrap_or_else(|| vec![DEFAULT_TABLE.to_string()])
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        let settings = Self {
            db: cli
                .db
                .or(file.db)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB)),
            tables,
            norm: cli
                .norm
                .or(file.norm)
                .unwrap_or_else(|| DEFAULT_NORM_TABLE.to_string()),
            width: cli.width.or(file.width).unwrap_or(DEFAULT_WIDTH),
            cell: cli.cell.or(file.cell).unwrap_or(DEFAULT_CELL),
        };

        if settings.tables.is_empty() {
            bail!("no tables to measure");
        }
        if settings.width == 0 {
            bail!("column width must be at least 1");
        }
        if settings.cell == 0 {
            bail!("cell width must be at least 1");
        }
        Ok(settings)
    }
}

/// `--config` if given, else `$NAED_CONFIG`, else nothing.
pub fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit.map(PathBuf::from).or_else(|| {
        std::env::var(CONFIG_ENV)
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
    })
}

pub fn parse_config(content: &str) -> Result<FileConfig> {
    toml::from_str(content).context("invalid config file")
}

pub fn load_config(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::resolve(Overrides::default(), FileConfig::default()).unwrap();
        assert_eq!(s.db, PathBuf::from("ddp.db"));
        assert_eq!(s.tables, vec!["feedback"]);
        assert_eq!(s.norm, "perf_feedback");
        assert_eq!(s.width, 20);
        assert_eq!(s.cell, 7);
    }

    #[test]
    fn test_cli_beats_file() {
        let file = parse_config(
            r#"
            db = "from-file.db"
            norm = "file_norm"
            width = 12
            "#,
        )
        .unwrap();
        let cli = Overrides {
            norm: Some("cli_norm".into()),
            ..Default::default()
        };
        let s = Settings::resolve(cli, file).unwrap();
        assert_eq!(s.db, PathBuf::from("from-file.db"));
        assert_eq!(s.norm, "cli_norm");
        assert_eq!(s.width, 12);
    }

    #[test]
    fn test_tables_trimmed() {
        let cli = Overrides {
            tables: Some(vec![" feedback".into(), "".into(), "edge_feedback ".into()]),
            ..Default::default()
        };
        let s = Settings::resolve(cli, FileConfig::default()).unwrap();
        assert_eq!(s.tables, vec!["feedback", "edge_feedback"]);
    }

    #[test]
    fn test_empty_tables_rejected() {
        let cli = Overrides {
            tables: Some(vec![" ".into()]),
            ..Default::default()
        };
        assert!(Settings::resolve(cli, FileConfig::default()).is_err());
    }

    #[test]
    fn test_zero_width_rejected() {
        let file = FileConfig {
            width: Some(0),
            ..Default::default()
        };
        assert!(Settings::resolve(Overrides::default(), file).is_err());

        let cli = Overrides {
            cell: Some(0),
            ..Default::default()
        };
        assert!(Settings::resolve(cli, FileConfig::default()).is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(parse_config("colour = \"red\"").is_err());
    }

    #[test]
    fn test_table_list_in_file() {
        let file = parse_config(r#"tables = ["feedback", "edge_feedback"]"#).unwrap();
        assert_eq!(
            file.tables,
            Some(vec!["feedback".to_string(), "edge_feedback".to_string()])
        );
    }

    #[test]
    fn test_explicit_config_path_wins() {
        let p = config_path(Some(Path::new("/tmp/naed.toml")));
        assert_eq!(p, Some(PathBuf::from("/tmp/naed.toml")));
    }

    #[test]
    fn test_load_missing_config_fails() {
        let dir = std::env::temp_dir().join("naed-config-test-missing");
        assert!(load_config(&dir.join("absent.toml")).is_err());
    }
}
