use std::time::Duration;

use pr_reviewer::{RequestContext, Services};

pub struct AppState {
    pub services: Services,
    pub request_timeout: Duration,
}

impl AppState {
    #[must_use]
    pub const fn new(services: Services, request_timeout: Duration) -> Self {
        Self {
            services,
            request_timeout,
        }
    }

    /// A fresh context for one request, expiring after `request_timeout`.
    #[must_use]
    pub fn context(&self) -> RequestContext {
        RequestContext::with_timeout(self.request_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_with_oversized_timeout_has_no_deadline() {
        let state = AppState::new(Services::in_memory(), Duration::from_secs(u64::MAX));

        let ctx = state.context();

        assert!(ctx.deadline().is_none());
        assert!(ctx.ensure_active().is_ok());
    }
}
