//! Shared fixtures for unit tests inside the crate.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use mockable::Clock;

use crate::domain::{Identity, IdentityId, User, Username};

/// Epoch milliseconds used as "now" across unit tests.
pub(crate) const FIXTURE_MILLIS: i64 = 1_700_000_000_000;

/// Clock pinned to a single instant.
pub(crate) struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(FIXTURE_MILLIS).expect("valid fixture timestamp")
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock + Send + Sync> {
    clock_at(fixture_now())
}

pub(crate) fn clock_at(utc_now: DateTime<Utc>) -> Arc<dyn Clock + Send + Sync> {
    Arc::new(FixtureClock { utc_now })
}

pub(crate) fn identity(id: &str) -> Identity {
    Identity::new(
        IdentityId::new(id).expect("valid identity id"),
        format!("{id}@example.com"),
        None,
    )
}

pub(crate) fn registered_user(id: &str, username: &str) -> User {
    User {
        id: IdentityId::new(id).expect("valid identity id"),
        username: Some(Username::new(username).expect("valid username")),
        email: format!("{id}@example.com"),
        display_name: None,
        created_at: fixture_now(),
        updated_at: fixture_now(),
    }
}
