use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use fataplus_core::RequestContext;
use http::StatusCode;
use jiff::Timestamp;

use crate::rules::{self, Rule};
use crate::{Bucket, Draft, ErrorEnvelope, Fault, FaultLogger, TracingLogger};

/// Outcome of classifying one fault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub bucket: Bucket,
    /// Status to send on the wire, always equal to `envelope.code`
    pub status: StatusCode,
    pub envelope: ErrorEnvelope,
}

/// Maps faults to response envelopes
///
/// Rules are evaluated in order and the first match wins. Faults that match
/// nothing, and faults whose rule panics, get the internal-error fallback.
pub struct Classifier {
    rules: Vec<Rule>,
    logger: Arc<dyn FaultLogger>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier").field("rules", &self.rules).finish_non_exhaustive()
    }
}

impl Classifier {
    pub fn builder() -> ClassifierBuilder {
        ClassifierBuilder::default()
    }

    /// Classify a fault, stamping the envelope with the current time
    pub fn classify(&self, fault: &Fault, ctx: &RequestContext) -> Classified {
        self.classify_at(fault, ctx, Timestamp::now())
    }

    /// Classify a fault, stamping the envelope with `now`
    ///
    /// Never panics: a failing rule degrades to the fallback response.
    pub fn classify_at(&self, fault: &Fault, ctx: &RequestContext, now: Timestamp) -> Classified {
        let (bucket, draft) = match panic::catch_unwind(AssertUnwindSafe(|| self.evaluate(fault, ctx))) {
            Ok(outcome) => outcome,
            Err(payload) => {
                tracing::error!(
                    panic = panic_message(payload.as_ref()),
                    kind = %fault.kind(),
                    "classification rule panicked, using fallback"
                );
                (Bucket::Internal, rules::fallback(fault, ctx))
            }
        };

        let classified = Classified {
            bucket,
            status: draft.status,
            envelope: ErrorEnvelope::stamp(draft, now),
        };

        if panic::catch_unwind(AssertUnwindSafe(|| self.logger.record(fault, ctx, &classified))).is_err() {
            tracing::error!("fault logger panicked");
        }

        classified
    }

    fn evaluate(&self, fault: &Fault, ctx: &RequestContext) -> (Bucket, Draft) {
        self.rules
            .iter()
            .find(|rule| rule.matches(fault))
            .map_or_else(
                || (Bucket::Internal, rules::fallback(fault, ctx)),
                |rule| (rule.bucket(), rule.respond(fault, ctx)),
            )
    }
}

/// Builder for a [`Classifier`] with extra rules or a custom logger
pub struct ClassifierBuilder {
    extra: Vec<Rule>,
    logger: Arc<dyn FaultLogger>,
}

impl Default for ClassifierBuilder {
    fn default() -> Self {
        Self {
            extra: Vec::new(),
            logger: Arc::new(TracingLogger),
        }
    }
}

impl ClassifierBuilder {
    /// Add a rule evaluated after the explicit-status rule and before the
    /// standard table
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.extra.push(rule);
        self
    }

    #[must_use]
    pub fn logger(mut self, logger: Arc<dyn FaultLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn build(self) -> Classifier {
        let mut rules = Vec::with_capacity(1 + self.extra.len() + 7);
        rules.push(rules::explicit());
        rules.extend(self.extra);
        rules.extend(rules::standard());

        Classifier {
            rules,
            logger: self.logger,
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}
