use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::app::AppState;

/// Process-wide admission gate over in-flight requests.
///
/// A request above the cap is rejected outright with 429; there is no
/// queueing. The counter and the cap live behind one mutex which is only
/// held for the increment or decrement, never across I/O. The cap is fixed
/// at startup.
pub struct RequestLimiter {
    max: usize,
    current: Mutex<usize>,
}

impl RequestLimiter {
    pub fn new(max: usize) -> Self {
        Self {
            max,
            current: Mutex::new(0),
        }
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn in_flight(&self) -> usize {
        *self.lock()
    }

    /// Admit one request, or refuse immediately when the cap is reached.
    pub fn try_acquire(self: Arc<Self>) -> Option<RequestPermit> {
        {
            let mut current = self.lock();
            if *current >= self.max {
                return None;
            }
            *current += 1;
        }
        Some(RequestPermit { limiter: self })
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        // The guarded value is a bare counter; a panic while holding the
        // lock cannot leave it inconsistent, so poisoning is ignored.
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases its admission slot when dropped, however the handler exits.
pub struct RequestPermit {
    limiter: Arc<RequestLimiter>,
}

impl Drop for RequestPermit {
    fn drop(&mut self) {
        *self.limiter.lock() -= 1;
    }
}

/// Axum layer applying the admission gate to every route.
pub async fn limit_concurrent_requests(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(_permit) = state.limiter.clone().try_acquire() else {
        return StatusCode::TOO_MANY_REQUESTS.into_response();
    };

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_up_to_the_cap() {
        let limiter = Arc::new(RequestLimiter::new(2));

        let first = limiter.clone().try_acquire();
        let second = limiter.clone().try_acquire();
        assert!(first.is_some());
        assert!(second.is_some());
        assert_eq!(limiter.in_flight(), 2);

        // Third concurrent request is refused, not queued.
        assert!(limiter.clone().try_acquire().is_none());
    }

    #[test]
    fn releasing_a_permit_admits_the_next_request() {
        let limiter = Arc::new(RequestLimiter::new(2));

        let first = limiter.clone().try_acquire();
        let _second = limiter.clone().try_acquire();
        assert!(limiter.clone().try_acquire().is_none());

        drop(first);
        assert_eq!(limiter.in_flight(), 1);
        assert!(limiter.clone().try_acquire().is_some());
    }

    #[test]
    fn zero_capacity_rejects_everything() {
        let limiter = Arc::new(RequestLimiter::new(0));
        assert!(limiter.try_acquire().is_none());
    }
}
