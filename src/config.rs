//! ==============================================================================
//! config.rs - Runtime Configuration Loader
//! ==============================================================================
//!
//! purpose:
//!     defines the schema for `thermo-hub.toml`.
//!     loads configuration from file or falls back to defaults.
//!
//! structure:
//!     - RestConfig / StatusConfig: Bind addresses for the two HTTP surfaces.
//!     - AdminConfig: Bearer token gating the /admin routes.
//!     - LoggingConfig: Default tracing filter (RUST_LOG still wins).
//!     - DeviceConfig: Reported network identity of the simulated device.
//!     - ClimateConfig: Initial thermostat set points and schedule.
//!
//! ==============================================================================

use serde::Deserialize;
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct HubConfig {
    #[serde(default)]
    pub rest: RestConfig,
    #[serde(default)]
    pub status: StatusConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub climate: ClimateConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RestConfig {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StatusConfig {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AdminConfig {
    /// Bearer token required on /admin routes. With no token configured
    /// every admin request is refused with 403.
    pub token: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DeviceConfig {
    pub ip: String,
    pub ssid: String,
    pub passphrase: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClimateConfig {
    pub day_temp: String,
    pub night_temp: String,
    pub threshold: String,
    /// Start of the day period, HH:MM
    pub day_start: String,
    /// Start of the night period, HH:MM
    pub night_start: String,
    pub mode: String,
    pub heating: String,
}

impl HubConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let config: HubConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config: {}", e))?;

        Ok(config)
    }

    /// Load with default fallback
    pub fn load_or_default() -> Self {
        let paths = [
            std::path::PathBuf::from("thermo-hub.toml"),
            std::path::PathBuf::from("config").join("thermo-hub.toml"),
        ];

        // runs before the tracing subscriber is up (the log level comes
        // from this very file), hence plain stdio here
        for path in &paths {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => {
                        println!("[CONFIG] Loaded from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        eprintln!("[CONFIG] Warning: Failed to load {}: {}", path.display(), e);
                    }
                }
            }
        }

        println!("[CONFIG] Warning: No config file found - using defaults");
        Self::default()
    }

    /// Log a configuration summary at startup
    pub fn log_summary(&self) {
        let admin_gate = if self.admin.token.is_some() {
            "token"
        } else {
            "closed"
        };
        tracing::info!(
            rest = %self.rest.bind,
            status = %self.status.bind,
            log_level = %self.logging.level,
            admin_gate,
            "hub configuration"
        );
        tracing::info!(
            day = %self.climate.day_temp,
            night = %self.climate.night_temp,
            threshold = %self.climate.threshold,
            "initial set points"
        );
    }
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3333".to_string(),
        }
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3334".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            ip: "192.168.1.123".to_string(),
            ssid: "MrWhite".to_string(),
            passphrase: "F".to_string(),
        }
    }
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            day_temp: "24.00".to_string(),
            night_temp: "18.00".to_string(),
            threshold: "0.20".to_string(),
            day_start: "06:00".to_string(),
            night_start: "22:00".to_string(),
            mode: "night".to_string(),
            heating: "off".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixture_constants() {
        let config = HubConfig::default();
        assert_eq!(config.device.ip, "192.168.1.123");
        assert_eq!(config.climate.day_temp, "24.00");
        assert_eq!(config.climate.night_start, "22:00");
        assert!(config.admin.token.is_none());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: HubConfig = toml::from_str(
            r#"
            [rest]
            bind = "127.0.0.1:9000"

            [admin]
            token = "hunter2"
            "#,
        )
        .unwrap();
        assert_eq!(config.rest.bind, "127.0.0.1:9000");
        assert_eq!(config.admin.token.as_deref(), Some("hunter2"));
        assert_eq!(config.status.bind, "0.0.0.0:3334");
        assert_eq!(config.climate.mode, "night");
    }
}
