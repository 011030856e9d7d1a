use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};
use service::errors::ServiceError;

// Prometheus metrics (default registry)
pub static STORE_OPS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "dashboard_api_store_ops_total",
        "Store operations by operation and outcome",
        &["op", "outcome"]
    )
    .expect("register store_ops_total")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    ListCases,
    ListDocuments,
    CreateCase,
    UpdateCase,
}

impl Op {
    pub fn as_str(self) -> &'static str {
        match self {
            Op::ListCases => "list_cases",
            Op::ListDocuments => "list_documents",
            Op::CreateCase => "create_case",
            Op::UpdateCase => "update_case",
        }
    }
}

pub fn record_ok(op: Op) {
    STORE_OPS_TOTAL.with_label_values(&[op.as_str(), "ok"]).inc();
}

pub fn record_err(op: Op, err: &ServiceError) {
    let outcome = if err.is_client_error() { "client_error" } else { "server_error" };
    STORE_OPS_TOTAL.with_label_values(&[op.as_str(), outcome]).inc();
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}

pub async fn metrics_handler() -> (StatusCode, String) {
    encode_metrics()
}
