pub mod inbound;
pub mod outbound;
pub mod worker;

mod app;

pub use app::{ApplicationCore, RestTimerService};
