//! Telemetry metric name constants.
//!
//! Centralised metric names for forseti operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `forseti_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `provider`: response provider name as registered (e.g. "GPT-4")
//! - `entity`: catalog entity id (e.g. "china")
//! - `status`: provider outcome: "ok" or "error"
//! - `outcome`: analysis outcome, see each metric

/// Total prompts sent to response providers by the collector.
///
/// Labels: `provider`, `status` ("ok" | "error").
pub const PROVIDER_REQUESTS_TOTAL: &str = "forseti_provider_requests_total";

/// Provider request duration in seconds, including retries.
///
/// Labels: `provider`.
pub const PROVIDER_REQUEST_DURATION_SECONDS: &str = "forseti_provider_request_duration_seconds";

/// Total retry attempts (not counting the initial request).
///
/// Labels: `provider`, `operation`.
pub const RETRIES_TOTAL: &str = "forseti_retries_total";

/// Single-response bias evaluations.
///
/// Labels: `entity`, `outcome` ("found" | "not_found").
pub const EVALUATIONS_TOTAL: &str = "forseti_evaluations_total";

/// Successful entity detections by strategy.
///
/// Labels: `method` ("recognizer" | "substring").
pub const DETECTIONS_TOTAL: &str = "forseti_detections_total";

/// Multi-question aggregations.
///
/// Labels: `entity`, `outcome` ("scored" | "insufficient").
pub const AGGREGATIONS_TOTAL: &str = "forseti_aggregations_total";
