use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, info};
use url::Url;

use crate::{process::ParsePolicy, query::DateField};

/// Shared sheet export for the Incheon International Airport Expressway closures.
pub const DEFAULT_SOURCE_URL: &str = "https://docs.google.com/spreadsheets/d/10R8pLgJmujkO6yiVR59ZqOe_qyQKcRMv4fh_C47BjqM/export?format=csv&gid=0";

/// Looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "closures.yaml";

/// Overrides `source_url` from any file.
pub const SOURCE_URL_ENV: &str = "CLOSURES_SOURCE_URL";

/// Settings from `closures.yaml`; every field is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// CSV export endpoint.
    pub source_url: Url,
    /// Drop (`lenient`) or reject (`strict`) short data lines.
    pub parse_policy: ParsePolicy,
    /// Column a date search compares: `block` or legacy `input`.
    pub date_field: DateField,
    /// HTTP request timeout; unset means wait indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            parse_policy: ParsePolicy::default(),
            date_field: DateField::default(),
            request_timeout_secs: None,
        }
    }
}

fn default_source_url() -> Url {
    Url::parse(DEFAULT_SOURCE_URL).expect("default source URL should parse")
}

impl Config {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] if it exists, else defaults.
    /// Then apply [`SOURCE_URL_ENV`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let p = PathBuf::from(DEFAULT_CONFIG_FILE);
                if p.is_file() {
                    Self::from_file(&p)?
                } else {
                    debug!("no {} found; using defaults", DEFAULT_CONFIG_FILE);
                    Self::default()
                }
            }
        };
        cfg.apply_env_override(std::env::var(SOURCE_URL_ENV).ok().as_deref())?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg = Self::from_yaml(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        info!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        // an empty file deserializes to unit, not to an empty mapping
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    fn apply_env_override(&mut self, value: Option<&str>) -> Result<()> {
        if let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.source_url = Url::parse(raw)
                .with_context(|| format!("parsing {}={}", SOURCE_URL_ENV, raw))?;
            debug!(url = %self.source_url, "source URL overridden from environment");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.source_url.as_str(), DEFAULT_SOURCE_URL);
        assert_eq!(cfg.parse_policy, ParsePolicy::Lenient);
        assert_eq!(cfg.date_field, DateField::Block);
        assert!(cfg.request_timeout().is_none());
    }

    #[test]
    fn test_from_yaml_partial() {
        let cfg = Config::from_yaml("parse_policy: strict\nrequest_timeout_secs: 15\n").unwrap();
        assert_eq!(cfg.parse_policy, ParsePolicy::Strict);
        assert_eq!(cfg.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(cfg.source_url.as_str(), DEFAULT_SOURCE_URL);
    }

    #[test]
    fn test_from_yaml_empty_and_unknown() {
        assert_eq!(Config::from_yaml("").unwrap().date_field, DateField::Block);
        assert!(Config::from_yaml("colour: blue\n").is_err());
        assert!(Config::from_yaml("source_url: not a url\n").is_err());
    }

    #[test]
    fn test_from_file() -> Result<()> {
        let mut f = NamedTempFile::new()?;
        writeln!(f, "source_url: http://127.0.0.1:8080/sheet.csv")?;
        writeln!(f, "date_field: input")?;

        let cfg = Config::load(Some(f.path()))?;
        assert_eq!(cfg.date_field, DateField::Input);
        assert_eq!(cfg.source_url.port(), Some(8080));
        Ok(())
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Config::from_file(Path::new("/nonexistent/closures.yaml")).is_err());
    }

    #[test]
    fn test_env_override() {
        let mut cfg = Config::default();
        cfg.apply_env_override(Some("https://example.com/a.csv")).unwrap();
        assert_eq!(cfg.source_url.as_str(), "https://example.com/a.csv");

        cfg.apply_env_override(Some("  ")).unwrap();
        assert_eq!(cfg.source_url.as_str(), "https://example.com/a.csv");

        assert!(cfg.apply_env_override(Some("::")).is_err());
    }
}
