pub mod client;
pub mod command;

pub use client::{Client, ClientError, ClientSettings};
pub use command::{Command, QueryArguments, StartArguments};
