//! Metrics collection.
//!
//! # Metrics
//! - `connex_signing_requests_total` (counter): signing requests by method
//! - `connex_signing_outcomes_total` (counter): outcomes by kind
//! - `connex_confirmation_wait_seconds` (histogram): time until receipt
//! - `connex_store_updates_total` (counter): published store states
//! - `connex_event_queries_total` (counter): event queries by event name
//!
//! The host application installs the recorder; without one these are no-ops.

use std::time::Duration;

pub fn record_signing_request(method: &str) {
    metrics::counter!("connex_signing_requests_total", "method" => method.to_string()).increment(1);
}

pub fn record_signing_outcome(kind: &'static str) {
    metrics::counter!("connex_signing_outcomes_total", "outcome" => kind).increment(1);
}

pub fn record_confirmation_wait(elapsed: Duration) {
    metrics::histogram!("connex_confirmation_wait_seconds").record(elapsed.as_secs_f64());
}

pub fn record_store_update() {
    metrics::counter!("connex_store_updates_total").increment(1);
}

pub fn record_event_query(event: &str, results: usize) {
    metrics::counter!("connex_event_queries_total", "event" => event.to_string()).increment(1);
    metrics::histogram!("connex_event_query_results").record(results as f64);
}
