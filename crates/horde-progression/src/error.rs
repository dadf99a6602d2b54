//! Error types for the progression layer.

use horde_core::types::{MissionId, ShopItemId};

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("progression data could not be encoded or decoded: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ShopError {
    #[error("{0} is not sold in this edition")]
    UnknownItem(ShopItemId),
    #[error("insufficient score: have {have}, need {need}")]
    InsufficientScore { have: u64, need: u64 },
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MissionError {
    #[error("{0} does not exist in this edition")]
    UnknownMission(MissionId),
    #[error("{0} completes through gameplay and cannot be claimed")]
    NotClaimable(MissionId),
    #[error("{0} is already completed")]
    AlreadyCompleted(MissionId),
}
