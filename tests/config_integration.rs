use std::env;
use std::fs;
use std::io::Write;
use std::time::Duration;

use ingres_ai::config::AppConfig;
use ingres_ai::language::Language;
use serial_test::serial;

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        for key in [
            "CONFIG_FILE",
            "PORT",
            "REPLY_DELAY_MS",
            "TIMEOUT_DISABLED",
            "LOG_FORMAT",
            "INGRES_SERVER__PORT",
            "INGRES_CHAT__REPLY_DELAY_MS",
            "INGRES_CHAT__DEFAULT_LANGUAGE",
            "INGRES_LOG__FORMAT",
        ] {
            env::remove_var(key);
        }
    }
}

fn load(args: &[&str]) -> Result<AppConfig, config::ConfigError> {
    AppConfig::load_from_args(std::iter::once("ingres-ai").chain(args.iter().copied()))
}

fn yaml_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("Failed to create temp config");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp config");
    file
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = load(&[]).expect("Failed to load defaults");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.reply_delay(), Duration::from_millis(1500));
    assert_eq!(config.default_language(), Language::En);
    assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    assert_eq!(config.idle_timeout(), Duration::from_secs(1800));
    assert_eq!(config.log.format, "pretty");
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("INGRES_SERVER__PORT", "9090");
        env::set_var("INGRES_CHAT__DEFAULT_LANGUAGE", "hi");
    }

    let config = load(&[]).expect("Failed to load config");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.default_language(), Language::Hi);

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let file = yaml_file(
        r"
server:
  port: 7070
chat:
  reply_delay_ms: 250
    ",
    );

    // Tell AppConfig to use this file via Env Var
    unsafe {
        env::set_var("CONFIG_FILE", file.path());
    }

    let config = load(&[]).expect("Failed to load config from file");
    assert_eq!(config.server.port, 7070);
    assert_eq!(config.reply_delay(), Duration::from_millis(250));

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_beats_env_and_file() {
    clear_env_vars();

    let file = yaml_file("server:\n  port: 7070\n");
    unsafe {
        env::set_var("INGRES_SERVER__PORT", "9090");
    }

    let path = file.path().to_string_lossy().into_owned();
    let config = load(&["--config", &path, "--port", "8181", "--reply-delay-ms", "10"])
        .expect("Failed to load config");
    assert_eq!(config.server.port, 8181);
    assert_eq!(config.chat.reply_delay_ms, 10);

    clear_env_vars();
}

#[test]
#[serial]
fn test_timeout_can_be_disabled() {
    clear_env_vars();

    let config = load(&["--timeout-disabled", "true"]).expect("Failed to load config");
    assert_eq!(config.request_timeout(), None);
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    clear_env_vars();

    assert!(load(&["--config", "/definitely/not/here.yaml"]).is_err());
}

#[test]
#[serial]
fn test_rejects_unknown_language_and_format() {
    clear_env_vars();

    unsafe {
        env::set_var("INGRES_CHAT__DEFAULT_LANGUAGE", "fr");
    }
    assert!(load(&[]).is_err());
    clear_env_vars();

    assert!(load(&["--log-format", "xml"]).is_err());
}

#[test]
#[serial]
fn test_cwd_config_fallback() {
    clear_env_vars();

    // Create ./config.yaml
    let cwd_path = "config.yaml";
    fs::write(cwd_path, "server:\n  port: 6060\n").expect("Failed to write ./config.yaml");

    let config = load(&[]);

    // Clean up before asserting so a failure does not leave the file behind.
    fs::remove_file(cwd_path).expect("Failed to remove ./config.yaml");

    assert_eq!(config.expect("Failed to load config").server.port, 6060);
}
