//! Exposition format of the metrics registry.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use tally_server::obs::Metrics;

#[test]
fn fresh_registry_renders_all_families() {
    let out = Metrics::new().render();
    for line in [
        "# TYPE requests_total counter",
        "# TYPE request_duration_seconds histogram",
        "# TYPE database_health gauge",
        "# TYPE votes_total counter",
        "database_health 0",
    ] {
        assert!(out.contains(line), "missing {line:?} in\n{out}");
    }
}

#[test]
fn request_counter_keyed_by_triple() {
    let m = Metrics::new();
    m.record_request("/vote", "POST", 200);
    m.record_request("/vote", "POST", 200);
    m.record_request("/vote", "POST", 400);

    let out = m.render();
    assert!(out.contains("requests_total{method=\"POST\",path=\"/vote\",status=\"200\"} 2"));
    assert!(out.contains("requests_total{method=\"POST\",path=\"/vote\",status=\"400\"} 1"));
}

#[test]
fn histogram_buckets_are_cumulative_seconds() {
    let m = Metrics::new();
    m.record_latency("/", "GET", Duration::from_millis(3));
    m.record_latency("/", "GET", Duration::from_millis(30));
    m.record_latency("/", "GET", Duration::from_secs(20));

    let out = m.render();
    let p = "request_duration_seconds_bucket{method=\"GET\",path=\"/\",";
    assert!(out.contains(&format!("{p}le=\"0.005\"}} 1")));
    assert!(out.contains(&format!("{p}le=\"0.05\"}} 2")));
    assert!(out.contains(&format!("{p}le=\"10\"}} 2")));
    assert!(out.contains(&format!("{p}le=\"+Inf\"}} 3")));
    assert!(out.contains("request_duration_seconds_count{method=\"GET\",path=\"/\"} 3"));
    assert!(out.contains("request_duration_seconds_sum{method=\"GET\",path=\"/\"} 20.033"));
    assert_eq!(m.request_duration.count(&[("path", "/"), ("method", "GET")]), 3);
}

#[test]
fn votes_are_per_company() {
    let m = Metrics::new();
    m.record_vote("a");
    m.record_vote("a");
    m.record_vote("b");

    let out = m.render();
    assert!(out.contains("votes_total{company=\"a\"} 2"));
    assert!(out.contains("votes_total{company=\"b\"} 1"));
    // Rows are sorted, so the output is stable between scrapes.
    assert!(out.find("company=\"a\"").unwrap() < out.find("company=\"b\"").unwrap());
}

#[test]
fn health_gauge_overwrites() {
    let m = Metrics::new();
    m.set_store_health(true);
    m.set_store_health(false);
    assert_eq!(m.store_health.get(), 0);
    m.set_store_health(true);
    assert!(m.render().contains("\ndatabase_health 1\n"));
}
