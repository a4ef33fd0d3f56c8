//! Core types for linkup.
//!
//! This crate holds everything the `linkup` CLI and provider binaries share:
//! - `event` / `friends`: the canonical records and their validation
//! - `store`: device-local persistence of the four collections
//! - `feed`: source selection, normalization, filtering and sorting
//! - `overlay` / `profile`: optimistic counters and profile statistics
//! - `map`: the map provider abstraction and its two implementations
//! - `remote`: the provider protocol used to reach a remote document store

pub mod backend;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod feed;
pub mod friends;
pub mod map;
pub mod overlay;
pub mod profile;
pub mod remote;
pub mod share;
pub mod store;

#[cfg(test)]
mod scenarios;

pub use event::{Event, EventDraft};
