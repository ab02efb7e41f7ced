mod file;
mod memory;

pub use file::FileSlotStorage;
pub use memory::MemorySlotStorage;
