//! Ambient transaction-outcome counters.
//!
//! These have no consensus meaning: they are never hashed, never part of
//! an event payload, and a lock-poisoning failure here is logged and
//! swallowed rather than propagated, the way the reference node's block
//! producer tracks throughput.

use std::sync::{Arc, Mutex, OnceLock};

use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

use crate::uint128::Uint128;

pub struct TxMetrics {
    outcomes: Arc<Mutex<IntCounterVec>>,
    gas_used: Arc<Mutex<HistogramVec>>,
}

impl TxMetrics {
    fn new() -> Self {
        let outcomes = IntCounterVec::new(
            Opts::new("tx_outcomes_total", "Transaction outcomes by status and payload type"),
            &["status", "payload_type"],
        )
        .expect("static metric definition is always valid");
        let gas_used = HistogramVec::new(
            HistogramOpts::new("tx_gas_used", "Gas charged per transaction by status and payload type"),
            &["status", "payload_type"],
        )
        .expect("static metric definition is always valid");
        TxMetrics {
            outcomes: Arc::new(Mutex::new(outcomes)),
            gas_used: Arc::new(Mutex::new(gas_used)),
        }
    }

    /// Records one transaction outcome: increments `tx_outcomes_total` and
    /// observes `gas` (the amount of gas actually charged) in
    /// `tx_gas_used`, both labeled by `status` and `payload_type`.
    pub fn record(&self, status: &str, payload_type: &str, gas: Uint128) {
        let Ok(lock) = self.outcomes.lock() else {
            tracing::error!("tx metrics mutex poisoned, dropping observation");
            return;
        };
        match lock.get_metric_with_label_values(&[status, payload_type]) {
            Ok(counter) => counter.inc(),
            Err(e) => tracing::error!("failed to record tx outcome metric: {e}"),
        }
        drop(lock);

        let Ok(lock) = self.gas_used.lock() else {
            tracing::error!("tx gas histogram mutex poisoned, dropping observation");
            return;
        };
        match lock.get_metric_with_label_values(&[status, payload_type]) {
            Ok(histogram) => histogram.observe(gas.as_u128() as f64),
            Err(e) => tracing::error!("failed to record tx gas histogram: {e}"),
        }
    }
}

static METRICS: OnceLock<TxMetrics> = OnceLock::new();

pub fn tx_metrics() -> &'static TxMetrics {
    METRICS.get_or_init(TxMetrics::new)
}
