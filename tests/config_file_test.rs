use std::env;
use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;
use todo_store_rs::config::{Config, StorageBackend};

// Mutex to ensure environment variable tests don't run in parallel
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_VARS: [&str; 6] = [
    "TODO_STORE_CONFIG",
    "TODO_STORE_STORAGE_BACKEND",
    "TODO_STORE_STORAGE_DIR",
    "TODO_STORE_STORAGE_KEY",
    "TODO_STORE_QUOTA_BYTES",
    "TODO_STORE_LOG_LEVEL",
];

fn clear_env() {
    for var in ENV_VARS {
        env::remove_var(var);
    }
}

fn write_config(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_load_config_from_yaml() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "todo-store.yaml",
        r#"
storage_backend: "memory"
storage_dir: "/var/lib/todos"
storage_key: "my-todos"
quota_bytes: 5242880
log_level: "debug"
"#,
    );

    let config = Config::from_file(&path).unwrap();

    assert_eq!(config.storage_backend, StorageBackend::Memory);
    assert_eq!(config.storage_dir.to_str(), Some("/var/lib/todos"));
    assert_eq!(config.storage_key, "my-todos");
    assert_eq!(config.quota_bytes, Some(5_242_880));
    assert_eq!(config.log_level, "debug");
}

#[test]
fn test_load_config_from_toml() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "todo-store.toml",
        r#"
storage_backend = "memory"
storage_key = "toml-todos"
"#,
    );

    let config = Config::from_file(&path).unwrap();

    assert_eq!(config.storage_backend, StorageBackend::Memory);
    assert_eq!(config.storage_key, "toml-todos");
    // Missing fields fall back to defaults
    assert_eq!(config.quota_bytes, None);
    assert_eq!(config.log_level, "info");
}

#[test]
fn test_config_validation_fails_for_empty_key() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "invalid.yaml", "storage_key: \"\"\n");

    assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_config_fails_for_unknown_backend() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "invalid.yaml", "storage_backend: \"redis\"\n");

    assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_load_config_from_env() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("TODO_STORE_STORAGE_BACKEND", "FILE");
    env::set_var("TODO_STORE_STORAGE_DIR", "/srv/todos");
    env::set_var("TODO_STORE_STORAGE_KEY", "env-todos");
    env::set_var("TODO_STORE_LOG_LEVEL", "WARN");

    let config = Config::from_env().unwrap().unwrap();

    assert_eq!(config.storage_backend, StorageBackend::File);
    assert_eq!(config.storage_dir.to_str(), Some("/srv/todos"));
    assert_eq!(config.storage_key, "env-todos");
    assert_eq!(config.quota_bytes, None);
    assert_eq!(config.log_level, "warn");

    clear_env();
}

#[test]
fn test_load_memory_quota_from_env() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("TODO_STORE_STORAGE_BACKEND", "memory");
    env::set_var("TODO_STORE_QUOTA_BYTES", "4096");

    let config = Config::load().unwrap();
    assert_eq!(config.storage_backend, StorageBackend::Memory);
    assert_eq!(config.quota_bytes, Some(4096));

    clear_env();
}

#[test]
fn test_load_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();

    let config = Config::load().unwrap();

    assert_eq!(config.storage_backend, StorageBackend::File);
    assert_eq!(config.storage_dir.to_str(), Some(".todo-store"));
    assert_eq!(config.storage_key, "todoList-app-todos");
    assert_eq!(config.quota_bytes, None);
}

#[test]
fn test_config_env_var_points_at_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();

    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "override.yaml", "storage_key: \"from-file\"\n");
    env::set_var("TODO_STORE_CONFIG", &path);

    let config = Config::load().unwrap();
    assert_eq!(config.storage_key, "from-file");

    clear_env();
}

#[test]
fn test_invalid_env_values() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("TODO_STORE_STORAGE_BACKEND", "postgres");
    assert!(Config::from_env().is_err());

    clear_env();
    env::set_var("TODO_STORE_QUOTA_BYTES", "lots");
    assert!(Config::from_env().is_err());

    clear_env();
}

#[test]
fn test_load_rejects_invalid_env_instead_of_defaulting() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("TODO_STORE_STORAGE_BACKEND", "file");
    env::set_var("TODO_STORE_STORAGE_DIR", "/tmp/todo-store-env");
    env::set_var("TODO_STORE_LOG_LEVEL", "verbose");

    assert!(Config::from_env().is_err());
    assert!(Config::load().is_err());

    clear_env();
}

#[test]
fn test_quota_with_file_backend_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("TODO_STORE_STORAGE_BACKEND", "file");
    env::set_var("TODO_STORE_QUOTA_BYTES", "4096");
    assert!(Config::load().is_err());

    clear_env();
}

#[test]
fn test_no_env_vars_yields_none() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();

    assert!(Config::from_env().unwrap().is_none());
}
