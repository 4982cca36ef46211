use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "prio.toml";
pub const CONFIG_ENV: &str = "PRIO_CONFIG";
pub const SECRET_ENV: &str = "PRIO_ACCESS_SECRET";

const DEFAULT_DATABASE: &str = "initiatives.db";
const DEFAULT_REFRESH_SECS: u64 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Relative paths resolve against the directory holding the config file.
    pub database: PathBuf,
    pub refresh_interval_secs: u64,
    pub lock_work_stream_on_edit: bool,
    pub color: bool,
    pub access: AccessConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            refresh_interval_secs: DEFAULT_REFRESH_SECS,
            lock_work_stream_on_edit: true,
            color: true,
            access: AccessConfig::default(),
        }
    }
}

impl Config {
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.refresh_interval_secs == 0 {
            anyhow::bail!("refresh_interval_secs must be at least 1");
        }
        if self.database.as_os_str().is_empty() {
            anyhow::bail!("database path must not be empty");
        }
        Ok(())
    }
}

/// A config together with the directory its relative paths hang off.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: Option<PathBuf>,
    base_dir: PathBuf,
}

impl LoadedConfig {
    pub fn defaults(base_dir: PathBuf) -> Self {
        Self {
            config: Config::default(),
            source: None,
            base_dir,
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read config {}: {e}", path.display()))?;
        let config = Config::parse(&content)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
            base_dir,
        })
    }

    pub fn database_path(&self) -> PathBuf {
        if self.config.database.is_absolute() {
            self.config.database.clone()
        } else {
            self.base_dir.join(&self.config.database)
        }
    }

    /// Shared secret, with the environment taking precedence over the file.
    pub fn access_secret(&self) -> Option<String> {
        std::env::var(SECRET_ENV)
            .ok()
            .filter(|s| !s.is_empty())
            .or_else(|| self.config.access.secret.clone())
    }
}

/// Resolve the config: an explicit path (flag or `PRIO_CONFIG`) must exist;
/// otherwise the nearest `prio.toml` walking up from the current directory,
/// then the per-user config file, then built-in defaults.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<LoadedConfig> {
    let explicit = explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
    if let Some(path) = explicit {
        return LoadedConfig::from_file(&path);
    }

    let cwd = std::env::current_dir()?;
    if let Some(path) = find_config_upwards(&cwd) {
        return LoadedConfig::from_file(&path);
    }
    if let Some(path) = user_config_path().filter(|p| p.is_file()) {
        return LoadedConfig::from_file(&path);
    }
    Ok(LoadedConfig::defaults(cwd))
}

/// Walk up from `start` looking for a `prio.toml`.
pub fn find_config_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("prio").join("config.toml"))
}

pub fn write_default_config(path: &Path) -> anyhow::Result<()> {
    let toml_str = toml::to_string_pretty(&Config::default())?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn parses_every_field() {
        let config = Config::parse(
            r#"
            database = "/srv/prio/initiatives.db"
            refresh_interval_secs = 2
            lock_work_stream_on_edit = false
            color = false

            [access]
            secret = "hunter2"
            "#,
        )
        .unwrap();
        assert_eq!(config.database, PathBuf::from("/srv/prio/initiatives.db"));
        assert_eq!(config.refresh_interval_secs, 2);
        assert!(!config.lock_work_stream_on_edit);
        assert!(!config.color);
        assert_eq!(config.access.secret.as_deref(), Some("hunter2"));
    }

    #[test]
    fn zero_refresh_interval_is_rejected() {
        assert!(Config::parse("refresh_interval_secs = 0").is_err());
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(Config::parse("color = \"yes\"").is_err());
    }

    #[test]
    fn relative_database_resolves_against_config_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "database = \"data/prio.db\"\n").unwrap();

        let loaded = LoadedConfig::from_file(&path).unwrap();
        assert_eq!(loaded.source.as_deref(), Some(path.as_path()));
        assert_eq!(loaded.database_path(), tmp.path().join("data/prio.db"));
    }

    #[test]
    fn default_config_round_trips_through_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sub").join(CONFIG_FILE_NAME);
        write_default_config(&path).unwrap();
        let loaded = LoadedConfig::from_file(&path).unwrap();
        assert_eq!(loaded.config, Config::default());
    }

    #[test]
    fn finds_config_in_parent_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE_NAME), "").unwrap();

        let found = find_config_upwards(&nested).unwrap();
        assert_eq!(found, tmp.path().join(CONFIG_FILE_NAME));
    }
}
