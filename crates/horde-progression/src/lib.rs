//! Persistent progression for HORDE: the upgrade economy and missions.
//!
//! `ProgressionStore` is the durable record. `Profile` pairs it with a
//! key-value backend and is the only way gameplay mutates it, so every
//! change is persisted as it happens.

pub mod error;
pub mod missions;
pub mod profile;
pub mod shop;
pub mod storage;
pub mod store;
pub mod tracker;

pub use error::{MissionError, ShopError, StorageError};
pub use profile::Profile;
pub use store::{MissionProgress, MissionState, ProgressionStore};
pub use tracker::{MissionCompletion, MissionTracker};
