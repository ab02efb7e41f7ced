mod endpoint;
mod init;
mod timer;

pub use endpoint::{Endpoint, ExchangeError};
pub use init::InitService;
pub use timer::TimerService;
