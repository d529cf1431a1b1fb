use super::*;
use crate::kernel::preview::DeviceType;
use tempfile::tempdir;

#[test]
fn default_file_is_written_once_and_loads_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(APP_DIR).join(SETTINGS_FILE);

    write_default_settings(&path).unwrap();
    assert_eq!(load_settings_from(&path), Some(Settings::default()));

    std::fs::write(&path, r#"{"preview": {"device": "tablet"}}"#).unwrap();
    write_default_settings(&path).unwrap();

    let loaded = load_settings_from(&path).unwrap();
    assert_eq!(loaded.preview.device, DeviceType::Tablet);
    assert_eq!(loaded.preview.debounce_ms, 1500);
}

#[test]
fn missing_or_invalid_file_yields_none() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    assert_eq!(load_settings_from(&path), None);

    std::fs::write(&path, "{ not json").unwrap();
    assert_eq!(load_settings_from(&path), None);
}

#[test]
fn paths_live_under_app_dir() {
    if let Some(path) = get_settings_path() {
        assert!(path.ends_with(Path::new(APP_DIR).join(SETTINGS_FILE)));
    }
    if let Some(dir) = get_log_dir() {
        assert!(dir.ends_with(Path::new(APP_DIR).join(LOG_DIR)));
    }
}
