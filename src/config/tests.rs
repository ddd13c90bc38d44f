use super::*;
use crate::logging::LogRotation;
use std::path::PathBuf;

const FULL: &str = r#"
[miner]
kind = "xmr-stak"
path = "/opt/miners/xmr-stak/xmr-stak"
endpoint = "http://127.0.0.1:16001/api.json"

[pool]
endpoint = "pool.example.com:3333"
wallet = "4AbcWallet"
algorithm = "cryptonight_heavy"

[processing]
threads = 4

[logging]
level = "debug"
file = "/var/log/bloc-miner.log"
rotation = "never"
"#;

#[test]
fn test_settings_full() {
    let settings = Settings::from_toml(FULL).unwrap();

    assert_eq!(settings.miner.kind, MinerKind::XmrStak);
    assert_eq!(settings.miner.config.path, PathBuf::from("/opt/miners/xmr-stak/xmr-stak"));
    assert_eq!(settings.miner.config.endpoint, "http://127.0.0.1:16001/api.json");
    assert_eq!(settings.pool.algorithm, "cryptonight_heavy");
    assert_eq!(settings.processing.threads, Some(4));
    assert_eq!(settings.logging.level, "debug");
    assert_eq!(settings.logging.file, Some(PathBuf::from("/var/log/bloc-miner.log")));
    assert_eq!(settings.logging.rotation, LogRotation::Never);
}

#[test]
fn test_settings_defaults() {
    let settings = Settings::from_toml(
        r#"
[miner]
path = "xmr-stak"

[pool]
endpoint = "pool.example.com:3333"
wallet = "4AbcWallet"
algorithm = "monero"
"#,
    )
    .unwrap();

    assert_eq!(settings.miner.kind, MinerKind::XmrStak);
    assert!(settings.miner.config.endpoint.is_empty());
    assert_eq!(settings.processing.threads, None);
    assert_eq!(settings.logging, LogConfig::default());
}

#[test]
fn test_settings_rejects_quote_in_pool_fields() {
    let content = FULL.replace("4AbcWallet", "4Abc\\\"Wallet");
    let err = Settings::from_toml(&content).unwrap_err();
    assert!(err.to_string().contains("pool.wallet"));
}

#[test]
fn test_settings_rejects_empty_values() {
    let content = FULL.replace("\"cryptonight_heavy\"", "\"  \"");
    assert!(Settings::from_toml(&content).is_err());

    let content = FULL.replace("\"/opt/miners/xmr-stak/xmr-stak\"", "\"\"");
    assert!(Settings::from_toml(&content).is_err());
}

#[test]
fn test_settings_rejects_unknown_kind() {
    let content = FULL.replace("kind = \"xmr-stak\"", "kind = \"xmrig\"");
    assert!(Settings::from_toml(&content).is_err());
}

#[test]
fn test_settings_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bloc-miner.toml");
    let path = path.to_str().unwrap();

    let settings = Settings::from_toml(FULL).unwrap();
    settings.save(path).unwrap();
    assert_eq!(Settings::load(path).unwrap(), settings);
}

#[test]
fn test_args_parse_watch() {
    let args = Args::parse_from(["bloc-miner", "-c", "custom.toml", "watch", "--interval", "30"]);
    assert_eq!(args.config, "custom.toml");
    assert_eq!(args.command, Command::Watch { interval: 30 });
    assert_eq!(args.log_level, None);
}

#[test]
fn test_settings_kind_is_case_insensitive() {
    let content = FULL.replace("kind = \"xmr-stak\"", "kind = \"XMR-Stak\"");
    let settings = Settings::from_toml(&content).unwrap();
    assert_eq!(settings.miner.kind, MinerKind::XmrStak);
}
