//! Driving port for read-only community views: leaderboard and profiles.

use async_trait::async_trait;

use crate::domain::{Error, IdentityId, Leaderboard, MonthlyActivity, OwnProfile, PublicProfile, Username};

/// Use-case port backing the leaderboard and profile pages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommunityQuery: Send + Sync {
    /// Top `limit` builders by project count plus headline totals.
    async fn leaderboard(&self, limit: usize) -> Result<Leaderboard, Error>;

    /// Projects created in each month of the current year.
    async fn monthly_activity(&self) -> Result<Vec<MonthlyActivity>, Error>;

    /// Public profile for `username`.
    async fn public_profile(&self, username: &Username) -> Result<PublicProfile, Error>;

    /// The caller's own profile.
    async fn own_profile(&self, id: &IdentityId) -> Result<OwnProfile, Error>;
}
