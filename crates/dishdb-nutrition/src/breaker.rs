//! Cooldown breaker for a provider that signals overload.
//!
//! Closed until [`CircuitBreaker::trip`] is called, then open until the
//! cooldown elapses, after which the next check sees it closed again. One
//! instance per provider, shared (`Arc`) by everything that calls it.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};

#[derive(Debug)]
pub struct CircuitBreaker {
    name: &'static str,
    cooldown: chrono::Duration,
    disabled_until: Mutex<Option<DateTime<Utc>>>,
}

impl CircuitBreaker {
    #[must_use]
    pub fn new(name: &'static str, cooldown: Duration) -> Self {
        Self {
            name,
            cooldown: chrono::Duration::from_std(cooldown).unwrap_or(chrono::Duration::MAX),
            disabled_until: Mutex::new(None),
        }
    }

    /// A breaker that is already open until `until`.
    #[must_use]
    pub fn tripped_until(name: &'static str, cooldown: Duration, until: DateTime<Utc>) -> Self {
        let breaker = Self::new(name, cooldown);
        *breaker.state() = Some(until);
        breaker
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open_at(Utc::now())
    }

    #[must_use]
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        self.state().is_some_and(|until| now < until)
    }

    pub fn trip(&self) {
        self.trip_at(Utc::now());
    }

    /// Opens the breaker for one cooldown starting at `now`.
    pub fn trip_at(&self, now: DateTime<Utc>) {
        let until = now.checked_add_signed(self.cooldown).unwrap_or(DateTime::<Utc>::MAX_UTC);
        *self.state() = Some(until);
        tracing::warn!(provider = self.name, disabled_until = %until, "circuit breaker tripped");
    }

    #[must_use]
    pub fn disabled_until(&self) -> Option<DateTime<Utc>> {
        *self.state()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, Option<DateTime<Utc>>> {
        // The guarded value is a plain timestamp, so a poisoned lock still
        // holds a usable state.
        self.disabled_until
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
