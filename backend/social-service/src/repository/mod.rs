pub mod comments;
pub mod likes;

pub use comments::{CommentRepository, InMemoryCommentRepository, PostgresCommentRepository};
pub use likes::{InMemoryLikeRepository, LikeRepository, PostgresLikeRepository};
