//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

/// Request tracing layer for every route.
///
/// - Span per request at `INFO` with method, URI and HTTP version
/// - Request start logged at `DEBUG`
/// - Response logged at `INFO` with status and latency in milliseconds
/// - 5xx responses (including mirrored upstream failures) logged at `ERROR`
///
/// Request headers are never recorded; webhook senders may put credentials
/// there.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=GET uri=/postal_codes/2000 version=HTTP/1.1}: finished processing request latency=3 ms status=200
/// ERROR request{method=GET uri=/hs-code version=HTTP/1.1}: response failed classification=Status code: 502 Bad Gateway latency=5001 ms
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(
            DefaultMakeSpan::new()
                .level(Level::INFO)
                .include_headers(false),
        )
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::ERROR)
                .latency_unit(LatencyUnit::Millis),
        )
}
