//! Kindness engine library.
//!
//! Review and like engagement for the novel site, backed by SQLite.
//!
//! ## Structure
//!
//! - `use_cases/` - Commands and queries callers issue
//! - `stores/` - In-process read models
//! - `infrastructure/` - Ports and their adapters (SQLite, memory, session, clock)
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

pub use app::App;
