//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories built on Diesel.
//! - **memory**: in-process repositories for development and tests.
//! - **identity**: access-token verifiers for the OAuth provider.
//!
//! Adapters translate between infrastructure representations and domain
//! records. They contain no business rules.

pub mod identity;
pub mod memory;
pub mod persistence;
