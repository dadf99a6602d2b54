//! Core types and definitions for the HORDE arena shooter.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, session counters and
//! tuning constants. It has no dependency on any runtime or storage layer.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
