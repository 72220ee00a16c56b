pub mod assembler;
pub mod models;
pub mod store;

pub use assembler::{FeedAssembler, FeedSettings};
pub use models::{FeedPage, PostSummary};
pub use store::{InMemoryPostStore, PostStore, PostgresPostStore};
