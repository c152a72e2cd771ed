use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// HTTP fetch parameters (optional `[fetch]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Seconds allowed for establishing the connection.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for the whole transfer of one source.
    pub timeout_secs: u64,
    /// Largest accepted body per source; larger sources are treated as unreachable.
    pub max_body_bytes: u64,
    /// Override for the `User-Agent` header (default `hostsgen/<version>`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 120,
            max_body_bytes: 50 * 1024 * 1024,
            user_agent: None,
        }
    }
}

impl FetchConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("hostsgen/{}", env!("CARGO_PKG_VERSION")))
    }
}

/// Global configuration loaded from `~/.config/hostsgen/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostsgenConfig {
    /// Directories that receive the `hosts` file when `--dir` is not given.
    /// Empty means the current directory.
    #[serde(default)]
    pub output_dirs: Vec<PathBuf>,
    /// Sources inserted when the registry database is created for the first time.
    #[serde(default)]
    pub default_sources: Vec<String>,
    #[serde(default)]
    pub fetch: FetchConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hostsgen")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HostsgenConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HostsgenConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)
            .with_context(|| format!("failed to write default config {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: HostsgenConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = HostsgenConfig::default();
        assert!(cfg.output_dirs.is_empty());
        assert!(cfg.default_sources.is_empty());
        assert_eq!(cfg.fetch.connect_timeout_secs, 15);
        assert_eq!(cfg.fetch.timeout_secs, 120);
        assert_eq!(cfg.fetch.max_body_bytes, 50 * 1024 * 1024);
        assert!(cfg.fetch.user_agent.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = HostsgenConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: HostsgenConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_without_fetch_section() {
        let toml = r#"
            output_dirs = ["/etc", "/tmp/hosts-out"]
        "#;
        let cfg: HostsgenConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            cfg.output_dirs,
            vec![PathBuf::from("/etc"), PathBuf::from("/tmp/hosts-out")]
        );
        assert!(cfg.default_sources.is_empty());
        assert_eq!(cfg.fetch, FetchConfig::default());
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            default_sources = ["https://a.example/hosts.txt"]

            [fetch]
            connect_timeout_secs = 5
            timeout_secs = 30
            max_body_bytes = 1_000_000
            user_agent = "custom-agent"
        "#;
        let cfg: HostsgenConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.default_sources, vec!["https://a.example/hosts.txt"]);
        assert_eq!(cfg.fetch.connect_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.fetch.timeout(), Duration::from_secs(30));
        assert_eq!(cfg.fetch.max_body_bytes, 1_000_000);
        assert_eq!(cfg.fetch.user_agent(), "custom-agent");
    }

    #[test]
    fn config_toml_partial_fetch_section() {
        let toml = r#"
            [fetch]
            timeout_secs = 10
        "#;
        let cfg: HostsgenConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.fetch.timeout_secs, 10);
        assert_eq!(cfg.fetch.connect_timeout_secs, 15);
        assert_eq!(cfg.fetch.max_body_bytes, 50 * 1024 * 1024);
    }

    #[test]
    fn default_user_agent_carries_version() {
        let ua = FetchConfig::default().user_agent();
        assert!(ua.starts_with("hostsgen/"));
    }
}
