//! Rate limiting middleware.
//!
//! Per-user rate limiting for authenticated API routes. Each user gets an
//! independent limiter created on first sight; unauthenticated requests
//! (health, metrics) bypass this layer entirely.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovRateLimiter,
};
use serde_json::json;
use std::{
    collections::HashMap,
    num::NonZeroU32,
    sync::{Arc, RwLock},
};
use uuid::Uuid;

use crate::app::AppState;
use crate::middleware::user_auth::UserAuth;

/// Type alias for the rate limiter used per user.
type UserRateLimiter = GovRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Rate limiter state shared across all requests.
pub struct RateLimiterState {
    limiters: RwLock<HashMap<Uuid, Arc<UserRateLimiter>>>,
    rate_limit_per_minute: u32,
}

impl RateLimiterState {
    /// Create a new rate limiter state with the specified limit per minute.
    pub fn new(rate_limit_per_minute: u32) -> Self {
        Self {
            limiters: RwLock::new(HashMap::new()),
            rate_limit_per_minute,
        }
    }

    fn get_or_create_limiter(&self, user_id: Uuid) -> Arc<UserRateLimiter> {
        {
            let limiters = self.limiters.read().unwrap();
            if let Some(limiter) = limiters.get(&user_id) {
                return limiter.clone();
            }
        }

        let mut limiters = self.limiters.write().unwrap();

        // Double-check in case another thread created it
        if let Some(limiter) = limiters.get(&user_id) {
            return limiter.clone();
        }

        let quota = Quota::per_minute(
            NonZeroU32::new(self.rate_limit_per_minute).unwrap_or(NonZeroU32::new(100).unwrap()),
        );
        let limiter = Arc::new(GovRateLimiter::direct(quota));
        limiters.insert(user_id, limiter.clone());
        limiter
    }

    /// Check if a request from the given user should be allowed.
    /// Returns Ok(()) if allowed, or Err with retry_after seconds.
    pub fn check(&self, user_id: Uuid) -> Result<(), u64> {
        let limiter = self.get_or_create_limiter(user_id);

        match limiter.check() {
            Ok(_) => Ok(()),
            Err(not_until) => {
                let wait_time = not_until.wait_time_from(governor::clock::Clock::now(
                    &governor::clock::DefaultClock::default(),
                ));
                Err(wait_time.as_secs().max(1))
            }
        }
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("active_limiters", &self.limiters.read().unwrap().len())
            .finish()
    }
}

/// Middleware enforcing the per-user request budget.
///
/// Runs after `require_user_auth`; requests without a `UserAuth` extension
/// pass through unmetered.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(limiter) = state.rate_limiter.as_ref() else {
        return next.run(req).await;
    };

    let Some(auth) = req.extensions().get::<UserAuth>() else {
        return next.run(req).await;
    };

    match limiter.check(auth.user_id) {
        Ok(()) => next.run(req).await,
        Err(retry_after) => {
            tracing::warn!(user_id = %auth.user_id, "Rate limit exceeded");
            let mut response = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({
                    "error": "rate_limited",
                    "message": "Too many requests. Please try again later.",
                })),
            )
                .into_response();
            if let Ok(value) = retry_after.to_string().parse() {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
            response
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_within_budget() {
        let state = RateLimiterState::new(10);
        let user = Uuid::new_v4();
        for _ in 0..10 {
            assert!(state.check(user).is_ok());
        }
    }

    #[test]
    fn test_rejects_over_budget_with_retry_after() {
        let state = RateLimiterState::new(2);
        let user = Uuid::new_v4();
        assert!(state.check(user).is_ok());
        assert!(state.check(user).is_ok());
        let retry_after = state.check(user).unwrap_err();
        assert!(retry_after >= 1);
    }

    #[test]
    fn test_limiters_are_per_user() {
        let state = RateLimiterState::new(1);
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        assert!(state.check(first).is_ok());
        // A different user has an untouched budget
        assert!(state.check(second).is_ok());
    }
}
