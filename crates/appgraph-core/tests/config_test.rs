use appgraph_core::config::{
    API_TIMEOUT_VAR, API_URL_VAR, DEFAULT_API_URL, DEFAULT_TIMEOUT, parse_timeout_secs,
};
use appgraph_core::{Error, IngestConfig};
use std::collections::HashMap;
use std::time::Duration;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn config_defaults_to_the_local_endpoint() {
    let config = IngestConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config.base_url.as_str(), format!("{DEFAULT_API_URL}/"));
    assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    assert_eq!(config.graphs_url(), "http://localhost:8001/graphs");
}

#[test]
fn config_reads_url_and_timeout_from_lookup() {
    let config = IngestConfig::from_lookup(lookup(&[
        (API_URL_VAR, "https://api.example.com"),
        (API_TIMEOUT_VAR, "3"),
    ]))
    .unwrap();
    assert_eq!(config.graphs_url(), "https://api.example.com/graphs");
    assert_eq!(config.timeout, Duration::from_secs(3));
}

#[test]
fn config_treats_blank_values_as_unset() {
    let config =
        IngestConfig::from_lookup(lookup(&[(API_URL_VAR, "  "), (API_TIMEOUT_VAR, "")])).unwrap();
    assert_eq!(config.graphs_url(), "http://localhost:8001/graphs");
    assert_eq!(config.timeout, DEFAULT_TIMEOUT);
}

#[test]
fn config_graphs_url_keeps_a_base_path() {
    let config = IngestConfig::new("http://host:9000/api/").unwrap();
    assert_eq!(config.graphs_url(), "http://host:9000/api/graphs");

    let config = IngestConfig::new("http://host:9000/api").unwrap();
    assert_eq!(config.graphs_url(), "http://host:9000/api/graphs");
}

#[test]
fn config_graphs_url_keeps_query_and_fragment() {
    let config = IngestConfig::new("http://h/api?k=v").unwrap();
    assert_eq!(config.graphs_url(), "http://h/api/graphs?k=v");

    let config = IngestConfig::new("https://h/?token=abc#top").unwrap();
    assert_eq!(config.graphs_url(), "https://h/graphs?token=abc#top");
}

#[test]
fn config_rejects_unusable_urls() {
    for raw in ["not a url", "ftp://host/", "mailto:someone@example.com"] {
        let err = IngestConfig::new(raw).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }), "{raw}: {err}");
    }
}

#[test]
fn config_rejects_zero_or_non_numeric_timeouts() {
    for raw in ["0", "ten", "-1", "1.5"] {
        let err = IngestConfig::from_lookup(lookup(&[(API_TIMEOUT_VAR, raw)])).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }), "{raw}: {err}");
    }
    assert_eq!(parse_timeout_secs(" 42 ").unwrap(), Duration::from_secs(42));
}

#[test]
fn config_with_timeout_overrides_the_default() {
    let config = IngestConfig::new(DEFAULT_API_URL)
        .unwrap()
        .with_timeout(Duration::from_secs(30));
    assert_eq!(config.timeout, Duration::from_secs(30));
}
