use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub latency: LatencyConfig,
    #[serde(default)]
    pub fixtures: FixturesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// Artificial delay applied to every service call.
#[derive(Debug, Clone, Deserialize)]
pub struct LatencyConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

impl Default for LatencyConfig {
    fn default() -> Self { Self { enabled: false, scale: default_scale() } }
}

fn default_scale() -> f64 { 1.0 }

#[derive(Debug, Clone, Deserialize, Default)]
pub struct FixturesConfig {
    /// Directory whose JSON files replace the bundled seed data.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

/// Load from `CONFIG_PATH` (default `config.toml`); a missing file yields defaults.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if !Path::new(&path).exists() {
        return Ok(AppConfig::default());
    }
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.apply_env_overrides(|key| std::env::var(key).ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Apply `SERVER_HOST`, `SERVER_PORT`, `FIXTURES_DIR` and `SIMULATE_LATENCY`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT").and_then(|p| p.trim().parse().ok()) {
            self.server.port = port;
        }
        if let Some(dir) = lookup("FIXTURES_DIR").filter(|d| !d.trim().is_empty()) {
            self.fixtures.dir = Some(PathBuf::from(dir));
        }
        if let Some(flag) = lookup("SIMULATE_LATENCY") {
            self.latency.enabled = matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.latency.validate()?;
        Ok(())
    }

    /// Scale for the delay policy, `None` when latency is off.
    pub fn latency_scale(&self) -> Option<f64> {
        self.latency.enabled.then_some(self.latency.scale)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl LatencyConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale < 0.0 {
            return Err(anyhow!("latency.scale must be a non-negative number"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_toml_gives_defaults() -> Result<()> {
        let mut cfg: AppConfig = toml::from_str("")?;
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.server.addr(), "127.0.0.1:8080");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert!(!cfg.latency.enabled);
        assert_eq!(cfg.latency_scale(), None);
        assert_eq!(cfg.logging.format, LogFormat::Compact);
        assert!(cfg.fixtures.dir.is_none());
        Ok(())
    }

    #[test]
    fn full_toml_is_read() -> Result<()> {
        let mut cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            worker_threads = 0

            [latency]
            enabled = true
            scale = 0.25

            [fixtures]
            dir = "./data"

            [logging]
            format = "json"
            "#,
        )?;
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.latency_scale(), Some(0.25));
        assert_eq!(cfg.fixtures.dir.as_deref(), Some(Path::new("./data")));
        assert_eq!(cfg.logging.format.as_str(), "json");
        Ok(())
    }

    #[test]
    fn env_overrides_win() -> Result<()> {
        let env: HashMap<&str, &str> = [
            ("SERVER_HOST", "0.0.0.0"),
            ("SERVER_PORT", "3001"),
            ("FIXTURES_DIR", "/srv/fixtures"),
            ("SIMULATE_LATENCY", "true"),
        ]
        .into_iter()
        .collect();
        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(|k| env.get(k).map(|v| v.to_string()));
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.server.addr(), "0.0.0.0:3001");
        assert_eq!(cfg.fixtures.dir, Some(PathBuf::from("/srv/fixtures")));
        assert_eq!(cfg.latency_scale(), Some(1.0));
        Ok(())
    }

    #[test]
    fn rejects_port_zero_and_negative_scale() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.latency.scale = -1.0;
        assert!(cfg.normalize_and_validate().is_err());
    }
}
