use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};
use service::errors::ServiceError;

// Prometheus metrics (default registry)
pub static INVENTORY_OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "inventory_operations_total",
        "Inventory operations by kind and outcome",
        &["op", "outcome"]
    )
    .expect("register inventory_operations_total")
});

pub static AUTH_REJECTIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "inventory_auth_rejections_total",
        "Requests rejected by the access gate"
    )
    .expect("register inventory_auth_rejections_total")
});

/// Count one inventory operation under `ok` or the error kind.
pub fn record<T>(op: &str, res: &Result<T, ServiceError>) {
    let outcome = match res {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    INVENTORY_OPERATIONS_TOTAL.with_label_values(&[op, outcome]).inc();
}

pub fn encode_metrics() -> (StatusCode, String) {
    // Touch the lazies so the families show up before the first request.
    Lazy::force(&INVENTORY_OPERATIONS_TOTAL);
    Lazy::force(&AUTH_REJECTIONS_TOTAL);
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}

pub async fn metrics() -> (StatusCode, String) {
    encode_metrics()
}
