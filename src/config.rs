use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::tasks::debounce::DEFAULT_DEBOUNCE_MS,
    service::types::DEFAULT_SERVICE_URL,
};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub service_url: String,
    pub debounce_ms: u64,
    pub request_timeout_secs: u64,
    pub service_check_interval_secs: u64,
    pub dark_mode: bool,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            request_timeout_secs: 10,
            service_check_interval_secs: 5,
            dark_mode: true,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn service_check_interval(&self) -> Duration {
        Duration::from_secs(self.service_check_interval_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"service_url": "http://10.0.0.5:8000"}"#).unwrap();

        assert_eq!(settings.service_url, "http://10.0.0.5:8000");
        assert_eq!(settings.debounce_window(), Duration::from_millis(500));
        assert_eq!(settings.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_zero_durations_are_floored() {
        let settings = Settings {
            request_timeout_secs: 0,
            service_check_interval_secs: 0,
            ..Settings::default()
        };
        assert_eq!(settings.request_timeout(), Duration::from_secs(1));
        assert_eq!(settings.service_check_interval(), Duration::from_secs(1));
    }
}
