use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use std::sync::Mutex;

use crate::error::{Error, Result};

/// Refuses calls once the reported budget is spent; never sleeps.
pub struct RateLimiter {
    state: Mutex<RateLimitState>,
}

#[derive(Debug, Clone, Copy)]
struct RateLimitState {
    remaining: Option<u32>,
    reset_at: Option<DateTime<Utc>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RateLimitState {
                remaining: None,
                reset_at: None,
            }),
        }
    }

    pub fn check(&self) -> Result<()> {
        self.check_at(Utc::now())
    }

    fn check_at(&self, now: DateTime<Utc>) -> Result<()> {
        let state = match self.state.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        };

        match (state.remaining, state.reset_at) {
            (Some(0), Some(reset_at)) if reset_at > now => {
                let wait = (reset_at - now).num_seconds().max(0) as u64;
                tracing::warn!("GitHub rate limit exhausted until {}", reset_at);
                Err(Error::RateLimited(wait))
            }
            (Some(0), None) => Err(Error::RateLimited(0)),
            _ => Ok(()),
        }
    }

    pub fn update_from_headers(&self, headers: &HeaderMap) {
        let remaining = headers
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u32>().ok());

        let Some(remaining) = remaining else {
            return;
        };

        let reset_at = headers
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<i64>().ok())
            .and_then(|ts| DateTime::from_timestamp(ts, 0));

        tracing::debug!("Rate limit remaining: {}", remaining);

        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.remaining = Some(remaining);
        state.reset_at = reset_at;
    }

    pub fn remaining(&self) -> Option<u32> {
        match self.state.lock() {
            Ok(guard) => guard.remaining,
            Err(poisoned) => poisoned.into_inner().remaining,
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
