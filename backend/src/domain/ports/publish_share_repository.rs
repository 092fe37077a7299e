//! Port for reading publish shares staged by the external IDE.

use async_trait::async_trait;

use crate::domain::PublishShare;

use super::define_port_error;

define_port_error! {
    /// Errors raised by publish share adapters.
    pub enum PublishShareRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "publish share repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "publish share repository query failed: {message}",
    }
}

/// Read-only access to publish shares. Shares are written by another system.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublishShareRepository: Send + Sync {
    /// Look up a share by its public token.
    async fn find_by_share_id(
        &self,
        share_id: &str,
    ) -> Result<Option<PublishShare>, PublishShareRepositoryError>;
}
