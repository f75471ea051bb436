use crate::config::{Config, DEFAULT_MODEL_PATH};
use std::env;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::OnceLock;

// Global lock to prevent race conditions when modifying environment variables in tests
static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn get_env_lock() -> &'static Mutex<()> {
    ENV_LOCK.get_or_init(|| Mutex::new(()))
}

const KEYS: &[&str] = &[
    "HOST",
    "PORT",
    "DEBUG",
    "MODEL_PATH",
    "OBSERVABILITY_ENABLED",
    "OBSERVABILITY_INTERVAL",
];

fn clear_env() {
    for key in KEYS {
        // SAFETY: callers hold ENV_LOCK, so no other test touches the environment concurrently
        unsafe { env::remove_var(key) };
    }
}

fn set_env(key: &str, value: &str) {
    // SAFETY: callers hold ENV_LOCK
    unsafe { env::set_var(key, value) };
}

#[test]
fn test_config_defaults() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();

    let config = Config::from_env().unwrap();

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 5000);
    assert!(!config.server.debug);
    assert_eq!(config.model.path, PathBuf::from(DEFAULT_MODEL_PATH));
    assert!(config.observability.enabled);
    assert_eq!(config.observability.interval_seconds, 60);
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_from_env_overrides() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();
    set_env("HOST", "127.0.0.1");
    set_env("PORT", "8081");
    set_env("DEBUG", "true");
    set_env("MODEL_PATH", "/srv/models/coffee.bin");
    set_env("OBSERVABILITY_ENABLED", "false");
    set_env("OBSERVABILITY_INTERVAL", " 15 ");

    let config = Config::from_env().unwrap();

    assert_eq!(config.server.bind_address(), "127.0.0.1:8081");
    assert!(config.server.debug);
    assert_eq!(config.model.path, PathBuf::from("/srv/models/coffee.bin"));
    assert!(!config.observability.enabled);
    assert_eq!(config.observability.interval_seconds, 15);

    clear_env();
}

#[test]
fn test_config_rejects_invalid_port() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();
    set_env("PORT", "not-a-port");

    let err = Config::from_env().unwrap_err();
    assert!(format!("{:#}", err).contains("PORT"));

    clear_env();
}

#[test]
fn test_config_rejects_invalid_bool() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();
    set_env("OBSERVABILITY_ENABLED", "maybe");

    assert!(Config::from_env().is_err());

    clear_env();
}
