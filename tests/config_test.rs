//! Tests for configuration loading

use serial_test::serial;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

use pokedex::config::{Config, DEFAULT_API_URL};

const ENV_KEYS: [&str; 6] = [
    "POKEDEX_API_URL",
    "POKEDEX_PAGE_SIZE",
    "POKEDEX_DEBOUNCE_MS",
    "POKEDEX_WEBHOOK_URL",
    "PORT",
    "SERVER_API",
];

fn clear_env() {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
    std::env::remove_var("POKEDEX_RELAY_ADDR");
}

#[test]
fn test_repository_config_toml_is_valid() {
    let config = Config::from_file(std::path::Path::new("config.toml"))
        .expect("config.toml should parse");
    config.validate().unwrap();

    assert_eq!(config.catalog.base_url, DEFAULT_API_URL);
    assert_eq!(config.pagination.page_size, 20);
    assert_eq!(config.debounce(), Duration::from_millis(300));
    assert!(config.notifications.webhook_url.is_none());
}

#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[catalog]
base_url = "http://localhost:8080/api/v2"
sprite_base_url = "http://localhost:8080/sprites"
request_timeout_secs = 5
user_agent = "pokedex-test"

[pagination]
page_size = 10
debounce_ms = 150
fallback_scan_limit = 200
fallback_result_cap = 5

[favorites]
path = "/tmp/favs.json"

[notifications]
webhook_url = "http://localhost:3000/webhook"

[relay]
bind_address = "127.0.0.1:3100"

[logging]
level = "debug"
format = "json"
"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    config.validate().unwrap();

    assert_eq!(config.pagination.page_size, 10);
    assert_eq!(config.pagination.fallback_result_cap, 5);
    assert_eq!(config.notifications.timeout_secs, 5);
    assert_eq!(config.relay.bind_address.port(), 3100);
    assert!(config.relay.allowed_origin.is_none());
    assert_eq!(config.logging.format, "json");
}

#[test]
fn test_from_file_rejects_garbage() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "this is [not toml").unwrap();

    assert!(Config::from_file(file.path()).is_err());
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();

    let config = Config::from_env().unwrap();

    assert_eq!(config.catalog.base_url, DEFAULT_API_URL);
    assert_eq!(config.relay.bind_address.port(), 3000);
    assert_eq!(
        config.relay.allowed_origin.as_deref(),
        Some("http://localhost:4200")
    );
    assert!(config.notifications.webhook_url.is_none());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    std::env::set_var("POKEDEX_API_URL", "http://localhost:9000/api");
    std::env::set_var("POKEDEX_PAGE_SIZE", "12");
    std::env::set_var("POKEDEX_DEBOUNCE_MS", "50");
    std::env::set_var("POKEDEX_WEBHOOK_URL", "http://localhost:3000/webhook");
    std::env::set_var("PORT", "4000");
    std::env::set_var("SERVER_API", "https://pokedex.example");

    let config = Config::from_env().unwrap();
    clear_env();

    assert_eq!(config.catalog.base_url, "http://localhost:9000/api");
    assert_eq!(config.pagination.page_size, 12);
    assert_eq!(config.debounce(), Duration::from_millis(50));
    assert_eq!(
        config.notifications.webhook_url.as_deref(),
        Some("http://localhost:3000/webhook")
    );
    assert_eq!(config.relay.bind_address.port(), 4000);
    assert_eq!(
        config.relay.allowed_origin.as_deref(),
        Some("https://pokedex.example")
    );
}

#[test]
#[serial]
fn test_from_env_invalid_relay_addr() {
    clear_env();
    std::env::set_var("POKEDEX_RELAY_ADDR", "not-an-address");

    let result = Config::from_env();
    clear_env();

    assert!(result.is_err());
}
