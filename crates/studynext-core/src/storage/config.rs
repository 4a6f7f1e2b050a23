//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Triage settings (Tonight Mode hour, first day of the week)
//! - Swipe thresholds and commit delay
//! - XP table for rewards
//! - The signed-in profile and its entitlement
//!
//! Configuration is stored at `~/.config/studynext/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, CoreError};
use crate::gesture::SwipeConfig;
use crate::rewards::RewardsConfig;
use crate::triage::TriageConfig;

/// Identity/profile context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default)]
    pub premium: bool,
}

fn default_user_id() -> String {
    "local".into()
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            premium: false,
        }
    }
}

impl Profile {
    /// Gate a premium-only view.
    ///
    /// # Errors
    /// Returns `CoreError::Entitlement` on a free profile.
    pub fn require_premium(&self, feature: &str) -> Result<(), CoreError> {
        if self.premium {
            Ok(())
        } else {
            Err(CoreError::Entitlement {
                feature: feature.to_string(),
            })
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studynext/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub triage: TriageConfig,
    #[serde(default)]
    pub swipe: SwipeConfig,
    #[serde(default)]
    pub rewards: RewardsConfig,
    #[serde(default)]
    pub profile: Profile,
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
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        data_dir()
            .map(|dir| dir.join("config.toml"))
            .map_err(|e| ConfigError::LoadFailed {
                path: PathBuf::from("config.toml"),
                message: e.to_string(),
            })
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.triage.validate()?;
        self.swipe.validate()?;
        self.rewards.validate()?;
        if self.profile.user_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "profile.user_id".into(),
                message: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Parse and validate TOML content.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// fails validation, or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_toml(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
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
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.clone(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
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

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result fails validation. `self` is unchanged on error.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| {
            ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            }
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(error = %e, "falling back to default configuration");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::WeekStart;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed = Config::from_toml(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = Config::from_toml("").unwrap();
        assert_eq!(cfg.triage.tonight_start_hour, 19);
        assert_eq!(cfg.swipe.commit_threshold, 100.0);
        assert_eq!(cfg.swipe.commit_delay_ms, 300);
        assert_eq!(cfg.profile.user_id, "local");
        assert!(!cfg.profile.premium);
    }

    #[test]
    fn partial_sections_fill_in_defaults() {
        let cfg = Config::from_toml(
            r#"
            [triage]
            week_starts_on = "monday"

            [profile]
            user_id = "sam"
            premium = true
            "#,
        )
        .unwrap();
        assert_eq!(cfg.triage.week_starts_on, WeekStart::Monday);
        assert_eq!(cfg.triage.tonight_start_hour, 19);
        assert_eq!(cfg.profile.user_id, "sam");
        assert!(cfg.profile.premium);
    }

    #[test]
    fn from_toml_rejects_invalid_values() {
        assert!(Config::from_toml("[triage]\ntonight_start_hour = 30\n").is_err());
        assert!(Config::from_toml("[rewards]\nxp_per_level = 0\n").is_err());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("triage.tonight_start_hour").as_deref(), Some("19"));
        assert_eq!(cfg.get("profile.premium").as_deref(), Some("false"));
        assert_eq!(cfg.get("triage.week_starts_on").as_deref(), Some("sunday"));
        assert!(cfg.get("triage.missing_key").is_none());
    }

    #[test]
    fn apply_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.apply("profile.premium", "true").unwrap();
        cfg.apply("swipe.commit_delay_ms", "450").unwrap();
        cfg.apply("triage.week_starts_on", "monday").unwrap();
        assert!(cfg.profile.premium);
        assert_eq!(cfg.swipe.commit_delay_ms, 450);
        assert_eq!(cfg.triage.week_starts_on, WeekStart::Monday);
    }

    #[test]
    fn apply_float_field_accepts_integer_text() {
        let mut cfg = Config::default();
        cfg.apply("swipe.commit_threshold", "80").unwrap();
        assert_eq!(cfg.swipe.commit_threshold, 80.0);
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.apply("profile.nickname", "x"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn apply_rejects_invalid_type_and_leaves_config_unchanged() {
        let mut cfg = Config::default();
        assert!(cfg.apply("profile.premium", "yes please").is_err());
        assert!(cfg.apply("triage.week_starts_on", "friday").is_err());
        assert!(cfg.apply("triage.tonight_start_hour", "25").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn free_profile_is_gated() {
        let free = Profile::default();
        assert!(matches!(
            free.require_premium("calendar"),
            Err(CoreError::Entitlement { .. })
        ));
        let premium = Profile {
            premium: true,
            ..Default::default()
        };
        assert!(premium.require_premium("calendar").is_ok());
    }
}
