use log::info;
use std::env;
use std::path::PathBuf;
use tokio::time::Duration;

use crate::models::AddressPrefix;

const DEFAULT_MAC_FILTER: AddressPrefix = AddressPrefix([0x00, 0x0D, 0x97]);
const DEFAULT_INTERFACE: &str = "wlan0";
const DEFAULT_SCAN_INTERVAL_MS: u64 = 100;
const DEFAULT_INDICATOR_CAPACITY: usize = 3;
const DEFAULT_DISPLAY_WIDTH: usize = 21; // 128 px at ~6 px per glyph

#[derive(Debug, Clone)]
pub struct PresenceConfig {
    pub mac_filter: AddressPrefix,
    pub interface: String,
    pub scan_interval: Duration,
    pub indicators_enabled: bool,
    pub display_enabled: bool,
    /// sysfs LED directories, one per indicator slot, in lighting order
    pub indicator_leds: Vec<PathBuf>,
    /// Slot count for logged indicators when no LEDs are configured
    pub indicator_capacity: usize,
    pub display_width: usize,
    pub show_strengths: bool,
}

impl PresenceConfig {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        // Load environment variables
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mac_filter = match var("MAC_FILTER") {
            Some(value) => value
                .parse::<AddressPrefix>()
                .map_err(|e| format!("Invalid MAC_FILTER '{}': {}", value, e))?,
            None => DEFAULT_MAC_FILTER,
        };

        let interface = var("WIFI_INTERFACE").unwrap_or_else(|| DEFAULT_INTERFACE.to_string());

        let scan_interval_ms = match var("SCAN_INTERVAL_MS") {
            Some(value) => value
                .parse::<u64>()
                .map_err(|e| format!("Invalid SCAN_INTERVAL_MS '{}': {}", value, e))?,
            None => DEFAULT_SCAN_INTERVAL_MS,
        };

        let indicators_enabled = parse_flag("DISP_LEDS", var("DISP_LEDS"), true)?;
        let display_enabled = parse_flag("DISP_TEXT", var("DISP_TEXT"), true)?;
        let show_strengths = parse_flag("SHOW_STRENGTHS", var("SHOW_STRENGTHS"), false)?;

        let indicator_leds: Vec<PathBuf> = var("INDICATOR_LEDS")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|dir| !dir.is_empty())
                    .map(PathBuf::from)
                    .collect()
            })
            .unwrap_or_default();

        let indicator_capacity = match var("INDICATOR_CAPACITY") {
            Some(value) => value
                .parse::<usize>()
                .map_err(|e| format!("Invalid INDICATOR_CAPACITY '{}': {}", value, e))?,
            None => DEFAULT_INDICATOR_CAPACITY,
        };

        let display_width = match var("DISPLAY_WIDTH") {
            Some(value) => value
                .parse::<usize>()
                .map_err(|e| format!("Invalid DISPLAY_WIDTH '{}': {}", value, e))?,
            None => DEFAULT_DISPLAY_WIDTH,
        };

        if !indicators_enabled && !display_enabled {
            return Err("No outputs enabled. Set DISP_LEDS and/or DISP_TEXT to true".into());
        }

        let config = PresenceConfig {
            mac_filter,
            interface,
            scan_interval: Duration::from_millis(scan_interval_ms),
            indicators_enabled,
            display_enabled,
            indicator_leds,
            indicator_capacity,
            display_width,
            show_strengths,
        };

        info!("MAC filter: {}", config.mac_filter);
        info!("Scanning on interface: {}", config.interface);
        for (slot, dir) in config.indicator_leds.iter().enumerate() {
            info!("Indicator slot {} -> {}", slot, dir.display());
        }

        Ok(config)
    }
}

fn parse_flag(
    key: &str,
    value: Option<String>,
    default: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(format!("Invalid {} '{}': expected true or false", key, value).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<PresenceConfig, Box<dyn std::error::Error>> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PresenceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.mac_filter, AddressPrefix([0x00, 0x0D, 0x97]));
        assert_eq!(config.interface, "wlan0");
        assert_eq!(config.scan_interval, Duration::from_millis(100));
        assert!(config.indicators_enabled);
        assert!(config.display_enabled);
        assert!(!config.show_strengths);
        assert!(config.indicator_leds.is_empty());
        assert_eq!(config.indicator_capacity, 3);
        assert_eq!(config.display_width, 21);
    }

    #[test]
    fn reads_all_variables() {
        let config = load(&[
            ("MAC_FILTER", "1a-2b-3c"),
            ("WIFI_INTERFACE", "wlp2s0"),
            ("SCAN_INTERVAL_MS", "2500"),
            ("DISP_LEDS", "off"),
            ("DISP_TEXT", "yes"),
            ("SHOW_STRENGTHS", "1"),
            ("INDICATOR_LEDS", "/sys/class/leds/a, ,/sys/class/leds/b"),
            ("INDICATOR_CAPACITY", "5"),
            ("DISPLAY_WIDTH", "32"),
        ])
        .unwrap();

        assert_eq!(config.mac_filter, AddressPrefix([0x1A, 0x2B, 0x3C]));
        assert_eq!(config.interface, "wlp2s0");
        assert_eq!(config.scan_interval, Duration::from_millis(2500));
        assert!(!config.indicators_enabled);
        assert!(config.display_enabled);
        assert!(config.show_strengths);
        assert_eq!(
            config.indicator_leds,
            vec![
                PathBuf::from("/sys/class/leds/a"),
                PathBuf::from("/sys/class/leds/b")
            ]
        );
        assert_eq!(config.indicator_capacity, 5);
        assert_eq!(config.display_width, 32);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = load(&[("MAC_FILTER", "  "), ("WIFI_INTERFACE", "")]).unwrap();
        assert_eq!(config.mac_filter, DEFAULT_MAC_FILTER);
        assert_eq!(config.interface, DEFAULT_INTERFACE);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(load(&[("MAC_FILTER", "00:0D")]).is_err());
        assert!(load(&[("SCAN_INTERVAL_MS", "soon")]).is_err());
        assert!(load(&[("DISP_LEDS", "maybe")]).is_err());
        assert!(load(&[("INDICATOR_CAPACITY", "-1")]).is_err());
    }

    #[test]
    fn requires_at_least_one_output() {
        let err = load(&[("DISP_LEDS", "false"), ("DISP_TEXT", "false")]).unwrap_err();
        assert!(err.to_string().contains("No outputs enabled"));
    }
}
