//! Shared types used across the comparison engine.

pub mod cancel;
pub mod error;
