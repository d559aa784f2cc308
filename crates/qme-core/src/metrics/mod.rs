//! Metrics collection abstraction for the worker loop.
//!
//! Backends implement [`MetricsBackend`] and are injected into the worker;
//! the default is [`NoOpMetrics`], which compiles to nothing.
mod backend;
pub use backend::{MetricsBackend, MetricsHandle};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

/// Create a no-op metrics handle.
#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}
