//! Contract showcase portal backend.
//!
//! Identity, username registration, the project and template catalogues, and
//! the cross-origin deploy relay, exposed over actix-web.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::{AccessGate, Trace};
