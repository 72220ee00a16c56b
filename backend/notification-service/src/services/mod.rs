pub mod dispatcher;

pub use dispatcher::{NotificationDispatcher, DEFAULT_PUSH_TIMEOUT};
