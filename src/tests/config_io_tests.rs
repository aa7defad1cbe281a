use std::{
    fs,
    path::PathBuf,
    sync::{Mutex, OnceLock},
    time::{SystemTime, UNIX_EPOCH},
};

use crate::config::{self, Config, RawConfig};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn lock_env() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("script-switcher-tests-{prefix}-{ts}"))
}

fn restore_config_dir(old: Option<std::ffi::OsString>) {
    match old {
        Some(v) => unsafe { std::env::set_var("SCRIPT_SWITCHER_CONFIG_DIR", v) },
        None => unsafe { std::env::remove_var("SCRIPT_SWITCHER_CONFIG_DIR") },
    }
}

#[test]
fn config_save_and_load_roundtrip_via_env_dir() {
    let _g = lock_env();

    let old = std::env::var_os("SCRIPT_SWITCHER_CONFIG_DIR");
    let dir = unique_temp_dir("config");
    fs::create_dir_all(&dir).unwrap();
    unsafe { std::env::set_var("SCRIPT_SWITCHER_CONFIG_DIR", &dir) };

    let cfg = Config {
        target_font: "Nirmala UI".to_owned(),
        legacy_font_marker: "sutonnyomj".to_owned(),
        ..Config::default()
    };

    config::save(&cfg).unwrap();
    let loaded = config::load().unwrap();

    restore_config_dir(old);
    let _ = fs::remove_dir_all(&dir);

    assert_eq!(loaded.target_font, "Nirmala UI");
    assert_eq!(loaded.legacy_font_marker, "sutonnyomj");
    assert_eq!(loaded.word_batch_size(), cfg.word_batch_size());
}

#[test]
fn load_without_a_file_yields_defaults() {
    let _g = lock_env();

    let old = std::env::var_os("SCRIPT_SWITCHER_CONFIG_DIR");
    let dir = unique_temp_dir("defaults");
    fs::create_dir_all(&dir).unwrap();
    unsafe { std::env::set_var("SCRIPT_SWITCHER_CONFIG_DIR", &dir) };

    let loaded = config::load().unwrap();

    restore_config_dir(old);
    let _ = fs::remove_dir_all(&dir);

    let defaults = Config::default();
    assert_eq!(loaded.encoding, defaults.encoding);
    assert_eq!(loaded.target_font, defaults.target_font);
    assert_eq!(loaded.match_policy(), defaults.match_policy());
    assert_eq!(loaded.font_batch_size(), defaults.font_batch_size());
}

#[test]
fn invalid_raw_config_is_rejected_on_conversion() {
    let raw = RawConfig {
        word_batch_size: 0,
        ..RawConfig::default()
    };
    let err = Config::try_from(raw).expect_err("zero batch size must be rejected");
    assert!(err.contains("word_batch_size"));

    let raw = RawConfig {
        match_policy: "guesswork".to_owned(),
        ..RawConfig::default()
    };
    let err = Config::try_from(raw).expect_err("unknown policy must be rejected");
    assert!(err.contains("guesswork"));
}
