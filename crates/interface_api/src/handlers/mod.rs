//! Request handlers

pub mod analysis;
pub mod auth;
pub mod health;
pub mod periods;
pub mod reports;
