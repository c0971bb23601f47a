//! Observability: cast events flow through [`sink::CastSink`] into the
//! per-thread counters in [`metrics`].

pub mod metrics;
pub mod sink;

pub use metrics::{CastCounters, CastMetricsState, FieldCounters, metrics_reset, metrics_snapshot};
pub use sink::{CastDirection, CastEvent, CastSink, RejectReason, with_sink};
