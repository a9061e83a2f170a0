//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod cache;
pub mod clock;
pub mod config;
mod helpers;
pub mod memory;
pub mod ports;
pub mod session;
pub mod sqlite;
