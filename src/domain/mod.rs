pub mod client;
pub mod clock;
pub mod daemon;
pub mod entity;
pub mod repository;
