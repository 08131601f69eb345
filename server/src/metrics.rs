use lazy_static::lazy_static;
use prometheus::{Counter, Encoder, Histogram, HistogramOpts, Opts, Registry, TextEncoder};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref SAMPLES_TOTAL: Counter = Counter::with_opts(Opts::new(
        "petcare_samples_total",
        "Total wearable samples received from the simulator"
    ))
    .unwrap();
    pub static ref INVALID_SAMPLES_TOTAL: Counter = Counter::with_opts(Opts::new(
        "petcare_invalid_samples_total",
        "Total wearable samples dropped by validation"
    ))
    .unwrap();
    pub static ref ACTIVITY_SNAPSHOTS_TOTAL: Counter = Counter::with_opts(Opts::new(
        "petcare_activity_snapshots_total",
        "Total activity-history snapshots published"
    ))
    .unwrap();
    pub static ref CHAT_REQUESTS_TOTAL: Counter = Counter::with_opts(Opts::new(
        "petcare_chat_requests_total",
        "Total chat turns sent to the generative backend"
    ))
    .unwrap();
    pub static ref CHAT_FAILURES_TOTAL: Counter = Counter::with_opts(Opts::new(
        "petcare_chat_failures_total",
        "Total chat turns that failed at the transport level"
    ))
    .unwrap();
    pub static ref CHAT_LATENCY_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "petcare_chat_latency_seconds",
            "Round-trip time of generative chat calls"
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0])
    )
    .unwrap();
}

pub fn init_metrics() {
    REGISTRY.register(Box::new(SAMPLES_TOTAL.clone())).unwrap();
    REGISTRY
        .register(Box::new(INVALID_SAMPLES_TOTAL.clone()))
        .unwrap();
    REGISTRY
        .register(Box::new(ACTIVITY_SNAPSHOTS_TOTAL.clone()))
        .unwrap();
    REGISTRY
        .register(Box::new(CHAT_REQUESTS_TOTAL.clone()))
        .unwrap();
    REGISTRY
        .register(Box::new(CHAT_FAILURES_TOTAL.clone()))
        .unwrap();
    REGISTRY
        .register(Box::new(CHAT_LATENCY_SECONDS.clone()))
        .unwrap();
}

pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}
