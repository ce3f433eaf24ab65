pub mod files;
pub mod slot;

pub use files::{ensure_data_dir, init_local_dir};
pub use slot::SlotStore;
