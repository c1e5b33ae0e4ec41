//! Testing utilities for apireq workspace
//!
//! Shared test helpers, fixtures, and assertions.

#![allow(missing_docs)]

use apireq_request::{Request, RequestConfig, StaticRequest};
use std::collections::BTreeMap;
use std::sync::Once;

/// Search form with nested filter and paging groups
pub fn create_search_request() -> StaticRequest {
    StaticRequest::from_values([
        ("q", vec!["rust"]),
        ("tags", vec!["1", "bad", "3"]),
        ("filter.status", vec!["open", "closed"]),
        ("filter.author.name", vec!["ada"]),
        ("filter.author.id", vec!["42"]),
        ("page.number", vec!["2"]),
        ("page.size", vec!["x"]),
    ])
}

/// Request with an exact-prefix parameter next to nested ones
pub fn create_overlapping_request() -> StaticRequest {
    StaticRequest::from_values([
        ("a", vec!["1", "2"]),
        ("a.b", vec!["x"]),
        ("ab", vec!["z"]),
    ])
}

/// Request with repeated groups `items.0.*`, `items.1.*`, ...
pub fn create_list_request(names: &[&str]) -> StaticRequest {
    StaticRequest::from_values(
        names
            .iter()
            .enumerate()
            .map(|(i, name)| (format!("items.{i}.name"), vec![(*name).to_string()])),
    )
}

/// Build a request from `name=value` pairs, as a query string would
pub fn create_request_from_pairs(pairs: &[(&str, &str)]) -> StaticRequest {
    StaticRequest::from_values(pairs.iter().map(|(name, value)| (*name, vec![*value])))
}

pub fn create_strict_config() -> RequestConfig {
    RequestConfig::new()
        .with_max_parameters(4)
        .with_max_values_per_parameter(2)
        .with_max_name_length(16)
}

/// Name to values snapshot, sorted for comparison
pub fn snapshot(request: &dyn Request) -> BTreeMap<String, Vec<String>> {
    request
        .parameters()
        .iter()
        .map(|p| (p.name().to_string(), p.values()))
        .collect()
}

pub fn parameter_names(request: &dyn Request) -> Vec<String> {
    request
        .parameters()
        .iter()
        .map(|p| p.name().to_string())
        .collect()
}

/// Install a `tracing` subscriber writing to the test harness, once
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
