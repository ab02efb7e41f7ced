pub mod slot;
pub mod state;

pub use slot::{SlotStorage, SlotStorageError};
pub use state::{
    EraseStateError, LoadStateError, SaveStateError, StateGateway, REST_TIMER_SLOT,
};
