pub mod app;
pub mod outbound;

pub use app::{Client, ClientError, ClientSettings};
