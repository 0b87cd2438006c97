//! Engine configuration stored in a TOML file named by `CONVEY_CONFIG`.

use std::env;
use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::reporter::{JsonLinesReporter, NilReporter, Reporter, TracingReporter};

/// Environment variable holding the path of the configuration file.
pub const CONFIG_ENV: &str = "CONVEY_CONFIG";

/// Which reporter the top-level [`convey`](crate::convey) entry points use.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReporterKind {
    #[default]
    Tracing,
    /// JSON lines on stdout.
    Json,
    Nil,
}

/// Engine configuration (TOML).
///
/// Missing fields default to sensible values; a missing file is the same as an
/// empty one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConveyConfig {
    pub reporter: ReporterKind,

    /// `EnvFilter` directive used by [`logging::init`](crate::logging::init)
    /// when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ConveyConfig {
    fn default() -> Self {
        Self {
            reporter: ReporterKind::Tracing,
            log_filter: "warn".to_string(),
        }
    }
}

impl ConveyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.log_filter.trim().is_empty() {
            return Err(anyhow!("log_filter must be a non-empty filter directive"));
        }
        Ok(())
    }

    /// Load the file named by [`CONFIG_ENV`], or the defaults when it is unset.
    pub fn from_env() -> Result<Self> {
        match env::var_os(CONFIG_ENV) {
            Some(path) => load_config(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// Build the configured reporter.
    pub fn reporter(&self) -> Box<dyn Reporter> {
        match self.reporter {
            ReporterKind::Tracing => Box::new(TracingReporter::default()),
            ReporterKind::Json => Box::new(JsonLinesReporter::new(io::stdout())),
            ReporterKind::Nil => Box::new(NilReporter),
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ConveyConfig::default()`.
pub fn load_config(path: &Path) -> Result<ConveyConfig> {
    if !path.exists() {
        let cfg = ConveyConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ConveyConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, ConveyConfig::default());
    }

    #[test]
    fn load_reads_reporter_and_keeps_other_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("convey.toml");
        fs::write(&path, "reporter = \"json\"\n").expect("write");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.reporter, ReporterKind::Json);
        assert_eq!(cfg.log_filter, "warn");
    }

    #[test]
    fn load_rejects_empty_log_filter() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("convey.toml");
        fs::write(&path, "log_filter = \"  \"\n").expect("write");

        let err = load_config(&path).expect_err("expected error");
        assert!(err.to_string().contains("log_filter"));
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("convey.toml");
        fs::write(&path, "reporter = \"fancy\"\n").expect("write");

        let err = load_config(&path).expect_err("expected error");
        assert!(err.to_string().contains("convey.toml"));
    }

    #[test]
    fn reporter_kinds_round_trip_through_toml() {
        let cfg = ConveyConfig {
            reporter: ReporterKind::Nil,
            log_filter: "convey=debug".to_string(),
        };
        let text = toml::to_string(&cfg).expect("serialize");
        let back: ConveyConfig = toml::from_str(&text).expect("parse");
        assert_eq!(back, cfg);
    }
}
