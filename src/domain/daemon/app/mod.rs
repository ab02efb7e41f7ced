mod core;
mod service;

pub use self::core::ApplicationCore;
pub use service::RestTimerService;
