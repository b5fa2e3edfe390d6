use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Where an imported report block lands when its name matches no existing
/// member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum UnresolvedPolicy {
    /// Track under the parsed name as a brand-new key (original behavior)
    #[default]
    NewKey,
    /// Pool under the unknown-user sentinel
    UnknownUser,
}

/// What the `debug` chat command does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum DebugMode {
    /// Run one close-out right away
    #[default]
    Immediate,
    /// Toggle the periodic close-out repeater
    Periodic,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) store: Option<PathBuf>,
    #[serde(default)]
    pub(crate) unresolved: Option<UnresolvedPolicy>,
    #[serde(default)]
    pub(crate) debug: Option<DebugMode>,
    /// Day of month the scheduled close-out fires (1-28)
    #[serde(default)]
    pub(crate) rollover_day: Option<u32>,
    /// Local hour the scheduled close-out fires (0-23)
    #[serde(default)]
    pub(crate) rollover_hour: Option<u32>,
    /// Tick interval for the debug periodic repeater
    #[serde(default)]
    pub(crate) debug_interval_secs: Option<u64>,
}

impl Config {
    pub(crate) fn load() -> Self {
        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/warikan/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("warikan").join("config.toml"));
        }

        // 2. Platform config dir (macOS Application Support etc.)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("warikan").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.warikan.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".warikan.toml"));
        }

        paths
    }

    pub(crate) fn unresolved(&self) -> UnresolvedPolicy {
        self.unresolved.unwrap_or_default()
    }

    pub(crate) fn debug_mode(&self) -> DebugMode {
        self.debug.unwrap_or_default()
    }

    pub(crate) fn rollover_day(&self) -> u32 {
        self.rollover_day.unwrap_or(1).clamp(1, 28)
    }

    pub(crate) fn rollover_hour(&self) -> u32 {
        self.rollover_hour.unwrap_or(9).clamp(0, 23)
    }

    pub(crate) fn debug_interval(&self) -> Duration {
        Duration::from_secs(self.debug_interval_secs.unwrap_or(3600).max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_paths_are_probed() {
        let paths = Config::get_config_paths();
        assert!(!paths.is_empty());
    }

    #[test]
    fn defaults_match_the_monthly_schedule() {
        let config = Config::default();
        assert_eq!(config.rollover_day(), 1);
        assert_eq!(config.rollover_hour(), 9);
        assert_eq!(config.unresolved(), UnresolvedPolicy::NewKey);
        assert_eq!(config.debug_mode(), DebugMode::Immediate);
    }

    #[test]
    fn toml_values_parse() {
        let config: Config = toml::from_str(
            r#"
            store = "/tmp/ledger.json"
            unresolved = "unknown-user"
            debug = "periodic"
            rollover_day = 15
            rollover_hour = 21
            debug_interval_secs = 60
            "#,
        )
        .unwrap();
        assert_eq!(config.unresolved(), UnresolvedPolicy::UnknownUser);
        assert_eq!(config.debug_mode(), DebugMode::Periodic);
        assert_eq!(config.rollover_day(), 15);
        assert_eq!(config.rollover_hour(), 21);
        assert_eq!(config.debug_interval(), Duration::from_secs(60));
    }

    #[test]
    fn out_of_range_schedule_values_are_clamped() {
        let config: Config = toml::from_str("rollover_day = 31\nrollover_hour = 99").unwrap();
        assert_eq!(config.rollover_day(), 28);
        assert_eq!(config.rollover_hour(), 23);
    }
}
