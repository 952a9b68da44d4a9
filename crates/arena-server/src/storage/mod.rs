//! Storage layer
//!
//! Uses SQLite (embedded) for all persistent rows.
//! Uses DashMap (in-memory) for revoked tokens.

pub mod db;
pub mod memory;

pub use db::Database;
pub use memory::RevokedTokens;
