use super::*;

use std::{
    env, fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn missing_file() -> PathBuf {
    env::temp_dir().join("snapdish_server_settings_that_do_not_exist.toml")
}

fn temp_settings_file(contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("snapdish_server_test_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("server.toml");
    fs::write(&path, contents).expect("write settings");
    path
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings = load_settings_from(&missing_file(), &HashMap::new()).expect("settings");

    assert_eq!(settings.bind_addr, "127.0.0.1:8000");
    assert_eq!(settings.gemini_model, "gemini-2.0-flash");
    assert_eq!(settings.max_upload_bytes, 10 * 1024 * 1024);
    assert!(settings.gemini_api_key.is_none());
    assert!(settings.api_key().is_err());
}

#[test]
fn conventional_variables_are_honoured() {
    let settings = load_settings_from(
        &missing_file(),
        &vars(&[("GOOGLE_API_KEY", "g-key"), ("SERVER_BIND", "0.0.0.0:9000")]),
    )
    .expect("settings");

    assert_eq!(settings.api_key().expect("key"), "g-key");
    assert_eq!(settings.bind_addr, "0.0.0.0:9000");
}

#[test]
fn prefixed_variables_win_over_file_and_conventional_ones() {
    let path = temp_settings_file(
        "bind_addr = \"127.0.0.1:7000\"\ngemini_model = \"from-file\"\nmax_upload_bytes = 1024\n",
    );
    let settings = load_settings_from(
        &path,
        &vars(&[
            ("GOOGLE_API_KEY", "conventional"),
            ("APP__GEMINI_API_KEY", "prefixed"),
            ("APP__MAX_UPLOAD_BYTES", "2048"),
        ]),
    )
    .expect("settings");

    assert_eq!(settings.api_key().expect("key"), "prefixed");
    assert_eq!(settings.bind_addr, "127.0.0.1:7000");
    assert_eq!(settings.gemini_model, "from-file");
    assert_eq!(settings.max_upload_bytes, 2048);

    if let Some(dir) = path.parent() {
        fs::remove_dir_all(dir).expect("cleanup");
    }
}

#[test]
fn blank_api_key_is_rejected() {
    let settings =
        load_settings_from(&missing_file(), &vars(&[("GOOGLE_API_KEY", "  ")])).expect("settings");
    assert!(settings.api_key().is_err());
}
