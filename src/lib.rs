pub mod client;
pub mod config;
pub mod daemon;
pub mod domain;
pub mod protocol;
pub mod utils;
