use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use log::{
    info,
    warn,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::core::MyoSimError;

const APP_NAME: &str = "myosim";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_data_file_path(filename: &str) -> PathBuf {
    get_app_data_dir().join(filename)
}

pub fn save_json<T: Serialize>(data: &T, filename: &str) -> Result<(), MyoSimError> {
    save_json_at(data, &get_data_file_path(filename))
}

pub fn save_json_at<T: Serialize>(data: &T, file_path: &Path) -> Result<(), MyoSimError> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(file_path, json)?;
    info!("event=data_saved path={}", file_path.display());
    Ok(())
}

pub fn load_json<T: for<'de> Deserialize<'de> + Default>(filename: &str) -> Result<T, MyoSimError> {
    load_json_at(&get_data_file_path(filename))
}

pub fn load_json_at<T: for<'de> Deserialize<'de> + Default>(
    file_path: &Path,
) -> Result<T, MyoSimError> {
    if !file_path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(file_path)?;
    let data: T = serde_json::from_str(&json)?;
    info!("event=data_loaded path={}", file_path.display());
    Ok(data)
}

pub fn load_json_or_default<T: for<'de> Deserialize<'de> + Default>(filename: &str) -> T {
    match load_json::<T>(filename) {
        Ok(data) => data,
        Err(e) => {
            warn!("event=data_load_failed file={} error={}. Using defaults.", filename, e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn test_settings_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let settings = Settings { debounce_ms: 250, ..Settings::default() };
        save_json_at(&settings, &path).unwrap();

        let loaded: Settings = load_json_at(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_toggled_dark_mode_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = Settings::default();
        save_json_at(&settings, &path).unwrap();
        settings.dark_mode = !settings.dark_mode;
        save_json_at(&settings, &path).unwrap();

        let loaded: Settings = load_json_at(&path).unwrap();
        assert_eq!(loaded.dark_mode, !Settings::default().dark_mode);
    }

    #[test]
    fn test_missing_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded: Settings = load_json_at(&dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load_json_at::<Settings>(&path), Err(MyoSimError::Json(_))));
    }
}
