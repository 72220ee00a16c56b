pub mod directory;
pub mod domain;
pub mod privacy;
pub mod repository;
pub mod service;

pub use directory::{InMemoryUserDirectory, PostgresUserDirectory, UserDirectory};
pub use domain::edge::{Edge, GraphStats};
pub use domain::user::{User, UserSummary};
pub use privacy::PrivacyGate;
pub use repository::{GraphRepositoryTrait, InMemoryGraphRepository, PostgresGraphRepository};
pub use service::RelationshipService;
