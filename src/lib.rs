use std::sync::Once;

pub mod atomic;
pub mod config;
pub mod errors;
pub mod records;
pub mod registration;
pub mod remote;
pub mod storage;
pub mod store;
pub mod views;

pub use errors::{Result, StoreError};
pub use storage::{FolderSubstrate, MemorySubstrate, Slot, Substrate};
pub use store::{RecordStore, SeedPolicy};

pub const GIGBOOK_FOLDER: &str = "gigbook";
pub const CONFIG_FILE: &str = "config.json";

pub static INIT: Once = Once::new();

/// Set up `env_logger` once per process.
///
/// Binaries call `env_logger::init()` directly; this is for tests
/// and embedders that may call it more than once.
pub fn initialize() {
    INIT.call_once(|| {
        let _ = env_logger::builder()
            .is_test(cfg!(test))
            .try_init();
        log::info!("Initializing gigbook");
    });
}
