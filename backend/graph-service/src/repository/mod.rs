mod memory_repository;
mod postgres_repository;
mod r#trait;

pub use memory_repository::InMemoryGraphRepository;
pub use postgres_repository::PostgresGraphRepository;
pub use r#trait::GraphRepositoryTrait;
