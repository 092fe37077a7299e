//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`IdentityVerifier`]) are implemented by
//! outbound adapters. Driving ports ([`UsernameRegistry`], [`ProjectCatalog`],
//! [`TemplateCatalog`], [`CommunityQuery`]) are implemented by domain services
//! and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod community_query;
mod identity_verifier;
mod project_catalog;
mod project_repository;
mod publish_share_repository;
mod template_catalog;
mod template_repository;
mod user_repository;
mod username_registry;

#[cfg(test)]
pub use community_query::MockCommunityQuery;
pub use community_query::CommunityQuery;
#[cfg(test)]
pub use identity_verifier::MockIdentityVerifier;
pub use identity_verifier::{IdentityVerificationError, IdentityVerifier};
#[cfg(test)]
pub use project_catalog::MockProjectCatalog;
pub use project_catalog::ProjectCatalog;
#[cfg(test)]
pub use project_repository::MockProjectRepository;
pub use project_repository::{ProjectRepository, ProjectRepositoryError};
#[cfg(test)]
pub use publish_share_repository::MockPublishShareRepository;
pub use publish_share_repository::{PublishShareRepository, PublishShareRepositoryError};
#[cfg(test)]
pub use template_catalog::MockTemplateCatalog;
pub use template_catalog::TemplateCatalog;
#[cfg(test)]
pub use template_repository::MockTemplateRepository;
pub use template_repository::{TemplateRepository, TemplateRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
#[cfg(test)]
pub use username_registry::MockUsernameRegistry;
pub use username_registry::{UsernameRegistry, UsernameStatus};
