use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| map.get(name).cloned()
}

#[test]
fn defaults_without_env() {
    let cfg = ServerConfig::from_lookup(lookup(&[]));
    assert_eq!(cfg, ServerConfig::default());
    assert_eq!(cfg.bind, "127.0.0.1:5000");
    assert_eq!(cfg.cors_origins, vec!["http://localhost:3000".to_string()]);
}

#[test]
fn env_overrides_apply() {
    let cfg = ServerConfig::from_lookup(lookup(&[
        ("BLOCKPARTY_BIND", "0.0.0.0:8080"),
        ("BLOCKPARTY_STATE_FILE", "/tmp/party.json"),
        ("BLOCKPARTY_CORS_ORIGINS", "http://a.test, ,http://b.test"),
        ("BLOCKPARTY_MAX_BODY_BYTES", "1024"),
    ]));
    assert_eq!(cfg.bind, "0.0.0.0:8080");
    assert_eq!(cfg.state_file, PathBuf::from("/tmp/party.json"));
    assert_eq!(cfg.cors_origins, vec!["http://a.test", "http://b.test"]);
    assert_eq!(cfg.max_body_bytes, 1024);
}

#[test]
fn bad_values_fall_back_to_defaults() {
    let cfg = ServerConfig::from_lookup(lookup(&[
        ("BLOCKPARTY_BIND", "   "),
        ("BLOCKPARTY_MAX_BODY_BYTES", "lots"),
    ]));
    assert_eq!(cfg.bind, DEFAULT_BIND);
    assert_eq!(cfg.max_body_bytes, ServerConfig::default().max_body_bytes);

    let cfg = ServerConfig::from_lookup(lookup(&[("BLOCKPARTY_MAX_BODY_BYTES", "0")]));
    assert_eq!(cfg.max_body_bytes, ServerConfig::default().max_body_bytes);
}

#[test]
fn empty_cors_list_disables_cors() {
    let cfg = ServerConfig::from_lookup(lookup(&[("BLOCKPARTY_CORS_ORIGINS", "")]));
    assert!(cfg.cors_origins.is_empty());
}
