//! HTTP handlers

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod registrations;
pub mod tournaments;

pub use health::health;
