//! One-directional card synchronization from Nextcloud Deck stacks to Trello lists.

pub mod api;
pub mod config;
pub mod error;
pub mod sync;
