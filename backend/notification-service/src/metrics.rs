use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};
use std::time::Duration;

static NOTIFICATION_PUSH_TOTAL: Lazy<Option<IntCounterVec>> = Lazy::new(|| {
    let counter = IntCounterVec::new(
        Opts::new(
            "notification_push_total",
            "Realtime push attempts by outcome",
        ),
        &["outcome"],
    )
    .ok()?;
    prometheus::default_registry()
        .register(Box::new(counter.clone()))
        .ok()?;
    Some(counter)
});

static NOTIFICATION_PUSH_DURATION_SECONDS: Lazy<Option<HistogramVec>> = Lazy::new(|| {
    let histogram = HistogramVec::new(
        HistogramOpts::new(
            "notification_push_duration_seconds",
            "Realtime push latency by transport",
        )
        .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]),
        &["transport"],
    )
    .ok()?;
    prometheus::default_registry()
        .register(Box::new(histogram.clone()))
        .ok()?;
    Some(histogram)
});

/// Outcome label of `notification_push_total`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcomeLabel {
    Delivered,
    NoSubscriber,
    Failed,
    Timeout,
}

impl PushOutcomeLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PushOutcomeLabel::Delivered => "delivered",
            PushOutcomeLabel::NoSubscriber => "no_subscriber",
            PushOutcomeLabel::Failed => "failed",
            PushOutcomeLabel::Timeout => "timeout",
        }
    }
}

pub fn record_push(outcome: PushOutcomeLabel, transport: &str, elapsed: Duration) {
    if let Some(counter) = NOTIFICATION_PUSH_TOTAL.as_ref() {
        counter.with_label_values(&[outcome.as_str()]).inc();
    }
    if let Some(histogram) = NOTIFICATION_PUSH_DURATION_SECONDS.as_ref() {
        histogram
            .with_label_values(&[transport])
            .observe(elapsed.as_secs_f64());
    }
}

/// Current value of `notification_push_total{outcome}`
pub fn push_count(outcome: PushOutcomeLabel) -> u64 {
    NOTIFICATION_PUSH_TOTAL
        .as_ref()
        .map(|counter| counter.with_label_values(&[outcome.as_str()]).get())
        .unwrap_or(0)
}
