//! # Plugin Configuration
//!
//! Loading, migration, and persistence of the driver-seat allow-list.
//!
//! The persisted document keeps the field names the original deployment
//! format uses (`"Version"`, `"Vehicle Short Prefab Names"`) so existing
//! config files keep working. The document is read once at startup and held
//! immutable afterwards; a version-mismatch migration rewrites it wholesale
//! before the plugin goes live.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Persisted plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverSeatConfig {
    /// Schema version, dotted triple (e.g. "1.1.1")
    #[serde(rename = "Version")]
    pub version: String,
    /// Vehicle type identifiers eligible for auto-relocation, in file order
    #[serde(rename = "Vehicle Short Prefab Names")]
    pub vehicle_short_prefab_names: Vec<String>,
}

impl DriverSeatConfig {
    /// The default configuration for a given running plugin version.
    pub fn default_for(version: &str) -> Self {
        Self {
            version: version.to_string(),
            vehicle_short_prefab_names: vec![
                "rowboat".to_string(),
                "rhib".to_string(),
                "minicopter.entity".to_string(),
                "scraptransporthelicopter".to_string(),
                "attackhelicopter.entity".to_string(),
            ],
        }
    }

    /// Whether the vehicle type identifier is on the allow-list.
    pub fn allows(&self, short_name: &str) -> bool {
        self.vehicle_short_prefab_names
            .iter()
            .any(|name| name == short_name)
    }
}

/// Errors surfaced by configuration loading.
///
/// Malformed JSON is an error rather than a silent reset: resetting would
/// throw away an operator's allow-list over a typo.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Loads the configuration from `path`, creating or migrating it as needed.
///
/// - Missing file: defaults for `running_version` are written and returned.
/// - Stored version older than `running_version`: migrated (full replacement
///   when the stored version predates 1.0.0, otherwise only the version tag
///   is bumped), logged at warn level, persisted back.
/// - Otherwise the stored document is returned as-is, re-persisted to
///   normalize formatting.
pub fn load_or_create(path: &Path, running_version: &str) -> Result<DriverSeatConfig, ConfigError> {
    if !path.exists() {
        let config = DriverSeatConfig::default_for(running_version);
        save(path, &config)?;
        return Ok(config);
    }

    let raw = fs::read_to_string(path)?;
    let mut config: DriverSeatConfig = serde_json::from_str(&raw)?;

    if compare_versions(&config.version, running_version) == Ordering::Less {
        config = migrate(config, running_version);
    }

    save(path, &config)?;
    Ok(config)
}

/// Persists the configuration as pretty-printed JSON.
pub fn save(path: &Path, config: &DriverSeatConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(config)?)?;
    Ok(())
}

fn migrate(stored: DriverSeatConfig, running_version: &str) -> DriverSeatConfig {
    warn!("Config changes detected! Updating...");

    let mut updated = if compare_versions(&stored.version, "1.0.0") == Ordering::Less {
        DriverSeatConfig::default_for(running_version)
    } else {
        stored.clone()
    };

    warn!(
        "Config update complete! Updated from version {} to {}",
        stored.version, running_version
    );
    updated.version = running_version.to_string();
    updated
}

/// Orders two dotted version strings.
///
/// Components are compared numerically when both parse, falling back to
/// string comparison for malformed components. A missing component sorts
/// before a present one ("1.1" < "1.1.0").
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ordering = match (x.parse::<u64>(), y.parse::<u64>()) {
                    (Ok(nx), Ok(ny)) => nx.cmp(&ny),
                    _ => x.cmp(y),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PLUGIN_VERSION;

    fn config_path(dir: &tempfile::TempDir) -> std::path::PathBuf {
        dir.path().join("always_driver_seat.json")
    }

    #[test]
    fn missing_file_writes_defaults() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = config_path(&dir);

        let config = load_or_create(&path, PLUGIN_VERSION).expect("Failed to load config");
        assert_eq!(config.version, PLUGIN_VERSION);
        assert!(config.allows("minicopter.entity"));
        assert!(config.allows("rowboat"));
        assert!(!config.allows("sedan"));
        assert!(path.exists());

        // The persisted document uses the original field names.
        let raw = fs::read_to_string(&path).expect("Failed to read config back");
        assert!(raw.contains("\"Version\""));
        assert!(raw.contains("\"Vehicle Short Prefab Names\""));
    }

    #[test]
    fn pre_one_zero_migration_replaces_everything() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = config_path(&dir);
        let stored = DriverSeatConfig {
            version: "0.9.0".to_string(),
            vehicle_short_prefab_names: vec!["sedan".to_string()],
        };
        save(&path, &stored).expect("Failed to seed config");

        let config = load_or_create(&path, PLUGIN_VERSION).expect("Failed to load config");
        assert_eq!(config.version, PLUGIN_VERSION);
        assert!(!config.allows("sedan"));
        assert!(config.allows("rhib"));
    }

    #[test]
    fn post_one_zero_migration_only_bumps_the_version() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = config_path(&dir);
        let stored = DriverSeatConfig {
            version: "1.0.0".to_string(),
            vehicle_short_prefab_names: vec!["snowmobile".to_string()],
        };
        save(&path, &stored).expect("Failed to seed config");

        let config = load_or_create(&path, PLUGIN_VERSION).expect("Failed to load config");
        assert_eq!(config.version, PLUGIN_VERSION);
        assert_eq!(config.vehicle_short_prefab_names, vec!["snowmobile"]);
    }

    #[test]
    fn current_version_is_left_untouched() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = config_path(&dir);
        let stored = DriverSeatConfig {
            version: PLUGIN_VERSION.to_string(),
            vehicle_short_prefab_names: vec!["rowboat".to_string()],
        };
        save(&path, &stored).expect("Failed to seed config");

        let config = load_or_create(&path, PLUGIN_VERSION).expect("Failed to load config");
        assert_eq!(config, stored);
    }

    #[test]
    fn malformed_json_is_an_error_not_a_reset() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = config_path(&dir);
        fs::write(&path, "{ not json").expect("Failed to seed config");

        let result = load_or_create(&path, PLUGIN_VERSION);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
        // The broken file is left in place for the operator to inspect.
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn version_ordering() {
        assert_eq!(compare_versions("1.0.0", "1.1.1"), Ordering::Less);
        assert_eq!(compare_versions("0.9.9", "1.0.0"), Ordering::Less);
        assert_eq!(compare_versions("1.1.1", "1.1.1"), Ordering::Equal);
        assert_eq!(compare_versions("1.2.0", "1.1.1"), Ordering::Greater);
        // Numeric, not lexicographic, when components parse.
        assert_eq!(compare_versions("1.10.0", "1.9.0"), Ordering::Greater);
        // Missing components sort first.
        assert_eq!(compare_versions("1.1", "1.1.0"), Ordering::Less);
    }
}
