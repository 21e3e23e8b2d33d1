//! Command implementations.

pub mod confirm;
pub mod upload;
