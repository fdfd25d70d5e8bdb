//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Work/rest interval durations and the reminder lead time
//! - Notification preferences
//! - Overlay hook commands (enter/exit/enforce)
//! - The optional screen-lock probe command
//!
//! Configuration is stored at `~/.config/restreminder/config.toml`.
//! The host re-reads it once per tick, so edits apply without a restart.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::timer::IntervalConfig;

/// Interval durations, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalsSection {
    #[serde(default = "default_work_secs")]
    pub work_secs: u64,
    #[serde(default = "default_rest_secs")]
    pub rest_secs: u64,
    /// Seconds before the end of a work phase at which the pre-break
    /// reminder fires. Clamped below `work_secs` when read.
    #[serde(default = "default_reminder_lead_secs")]
    pub reminder_lead_secs: u64,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsSection {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Shell commands the host runs on rest transitions.
///
/// `enter_command` acquires the full-screen break display, `exit_command`
/// releases it, and `enforce_command` is the break enforcement action run
/// when the rest countdown hits zero (e.g. a screensaver or session-lock
/// command). All are optional; an unset command is a no-op.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverlaySection {
    #[serde(default)]
    pub enter_command: Option<String>,
    #[serde(default)]
    pub exit_command: Option<String>,
    #[serde(default)]
    pub enforce_command: Option<String>,
}

/// Screen-lock detection.
///
/// If set, `probe_command` is run once per tick; exit status 0 means the
/// screen is currently locked. Lock/unlock edges feed the engine's
/// lock/unlock hooks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LockWatchSection {
    #[serde(default)]
    pub probe_command: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/restreminder/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub intervals: IntervalsSection,
    #[serde(default)]
    pub notifications: NotificationsSection,
    #[serde(default)]
    pub overlay: OverlaySection,
    #[serde(default)]
    pub lock_watch: LockWatchSection,
}

// Default functions
fn default_work_secs() -> u64 {
    25 * 60
}
fn default_rest_secs() -> u64 {
    5 * 60
}
fn default_reminder_lead_secs() -> u64 {
    5 * 60
}
fn default_true() -> bool {
    true
}

impl Default for IntervalsSection {
    fn default() -> Self {
        Self {
            work_secs: default_work_secs(),
            rest_secs: default_rest_secs(),
            reminder_lead_secs: default_reminder_lead_secs(),
        }
    }
}

impl Default for NotificationsSection {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            intervals: IntervalsSection::default(),
            notifications: NotificationsSection::default(),
            overlay: OverlaySection::default(),
            lock_watch: LockWatchSection::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: e.to_string(),
                        })?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: format!("cannot parse '{value}' as number"),
                        })?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Null => {
                        // Optional string fields (overlay/lock commands).
                        serde_json::Value::String(value.into())
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the defaults if no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config =
                    toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                        path,
                        message: e.to_string(),
                    })?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning defaults on any error.
    /// Convenience for the tick loop, which must never stall on config.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be
    /// parsed, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        self.save()?;
        Ok(())
    }

    /// The validated durations the engine consumes.
    ///
    /// Clamping lives here, not in the engine: durations are floored at
    /// one second and a reminder lead at or above the work duration is
    /// capped just below it.
    pub fn intervals(&self) -> IntervalConfig {
        IntervalConfig::clamped(
            self.intervals.work_secs,
            self.intervals.rest_secs,
            self.intervals.reminder_lead_secs,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.intervals.work_secs, 1500);
        assert_eq!(parsed.intervals.rest_secs, 300);
        assert_eq!(parsed.notifications.enabled, true);
    }

    #[test]
    fn empty_toml_uses_section_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.intervals.work_secs, 1500);
        assert_eq!(parsed.intervals.reminder_lead_secs, 300);
        assert!(parsed.overlay.enforce_command.is_none());
        assert!(parsed.lock_watch.probe_command.is_none());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("intervals.work_secs").as_deref(), Some("1500"));
        assert_eq!(cfg.get("notifications.enabled").as_deref(), Some("true"));
        assert!(cfg.get("intervals.missing_key").is_none());
    }

    #[test]
    fn set_json_value_by_path_updates_nested_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "intervals.work_secs", "3000").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "intervals.work_secs").unwrap(),
            &serde_json::Value::Number(3000.into())
        );
    }

    #[test]
    fn set_json_value_by_path_updates_nested_bool() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "notifications.enabled", "false").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "notifications.enabled").unwrap(),
            &serde_json::Value::Bool(false)
        );
    }

    #[test]
    fn set_json_value_by_path_fills_optional_command() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "overlay.enforce_command", "xdg-screensaver activate")
            .unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "overlay.enforce_command").unwrap(),
            &serde_json::Value::String("xdg-screensaver activate".to_string())
        );
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "intervals.nonexistent", "1");
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_json_value_by_path_rejects_invalid_type() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "intervals.work_secs", "soon");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn intervals_clamps_lead_below_work() {
        let mut cfg = Config::default();
        cfg.intervals.work_secs = 60;
        cfg.intervals.reminder_lead_secs = 600;
        let intervals = cfg.intervals();
        assert_eq!(intervals.work_secs, 60);
        assert_eq!(intervals.reminder_lead_secs, 59);
    }

    #[test]
    fn intervals_floors_durations() {
        let mut cfg = Config::default();
        cfg.intervals.work_secs = 0;
        cfg.intervals.rest_secs = 0;
        let intervals = cfg.intervals();
        assert_eq!(intervals.work_secs, 1);
        assert_eq!(intervals.rest_secs, 1);
    }
}
