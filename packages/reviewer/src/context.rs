use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::ServiceError;

/// Cancellation and deadline handle passed into every service operation.
///
/// Clones share the same cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl RequestContext {
    /// A context that never expires on its own.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// A context expiring `timeout` from now. A timeout too large to
    /// represent as an [`Instant`] means no deadline.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Instant::now()
            .checked_add(timeout)
            .map_or_else(Self::background, Self::with_deadline)
    }

    #[must_use]
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Fails if the caller gave up on this operation.
    ///
    /// # Errors
    ///
    /// * If the context was cancelled
    /// * If the deadline has passed
    pub fn ensure_active(&self) -> Result<(), ServiceError> {
        if self.is_cancelled() {
            return Err(ServiceError::Cancelled("request was cancelled"));
        }
        if self.is_expired() {
            return Err(ServiceError::Cancelled("request deadline exceeded"));
        }
        Ok(())
    }
}
