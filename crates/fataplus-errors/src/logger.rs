use fataplus_core::RequestContext;

use crate::{Classified, Fault};

/// Side channel notified of every classified fault
///
/// Injected into the [`Classifier`](crate::Classifier) so classification
/// itself stays free of global state.
pub trait FaultLogger: Send + Sync {
    fn record(&self, fault: &Fault, ctx: &RequestContext, classified: &Classified);
}

/// Logs faults through `tracing`
///
/// Server-side failures are logged at `error`, client-side ones at `warn`.
/// Stacks are only emitted at `debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl FaultLogger for TracingLogger {
    fn record(&self, fault: &Fault, ctx: &RequestContext, classified: &Classified) {
        let request_id = ctx.request_id.as_deref().unwrap_or("-");
        let status = classified.status.as_u16();

        if classified.status.is_server_error() {
            tracing::error!(
                bucket = %classified.bucket,
                status,
                request_id,
                environment = %ctx.environment,
                kind = %fault.kind(),
                reason = fault.message(),
                "request failed"
            );
        } else {
            tracing::warn!(
                bucket = %classified.bucket,
                status,
                request_id,
                environment = %ctx.environment,
                kind = %fault.kind(),
                reason = fault.message(),
                "request rejected"
            );
        }

        if let Some(stack) = fault.stack() {
            tracing::debug!(request_id, stack, "fault stack");
        }
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl FaultLogger for NoopLogger {
    fn record(&self, _: &Fault, _: &RequestContext, _: &Classified) {}
}
