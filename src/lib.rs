//! Kickoff Library
//!
//! Navigation, caching and team data for the Kickoff terminal UI. The binary
//! wires these to a real terminal, the filesystem and the network; the
//! integration tests drive them directly.

pub mod app;
pub mod cache;
pub mod cli;
pub mod data;
pub mod logging;
pub mod nav;
pub mod store;
pub mod ui;
