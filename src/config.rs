use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::availability::{SCAN_STEP_MINUTES, WORK_DAY_END, WORK_DAY_START};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default = "default_work_day_start")]
    pub work_day_start: String,
    #[serde(default = "default_work_day_end")]
    pub work_day_end: String,
    #[serde(default = "default_slot_step_minutes")]
    pub slot_step_minutes: u32,
}

fn default_port() -> u16 {
    5000
}

fn default_work_day_start() -> String {
    WORK_DAY_START.to_string()
}

fn default_work_day_end() -> String {
    WORK_DAY_END.to_string()
}

fn default_slot_step_minutes() -> u32 {
    SCAN_STEP_MINUTES
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port() }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            work_day_start: default_work_day_start(),
            work_day_end: default_work_day_end(),
            slot_step_minutes: default_slot_step_minutes(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { server: ServerConfig::default(), scheduler: SchedulerConfig::default() }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        // If config doesn't exist, create default
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save()?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&config_path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    pub fn save(&self) -> Result<()> {
        let config_path = get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content).context("Failed to write config file")?;

        Ok(())
    }
}

fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "slotwise", "slotwise")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.scheduler.work_day_start, "09:00");
        assert_eq!(config.scheduler.work_day_end, "17:00");
        assert_eq!(config.scheduler.slot_step_minutes, 30);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 8080
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.scheduler.work_day_start, "09:00");
        assert_eq!(config.scheduler.slot_step_minutes, 30);
    }

    #[test]
    fn test_round_trip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let restored: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(restored.server.port, config.server.port);
        assert_eq!(restored.scheduler.work_day_end, config.scheduler.work_day_end);
    }
}
