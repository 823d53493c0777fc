//! User-facing comparison operations
//!
//! - `compare`: runs a classification in a background task and streams
//!   progress events back through a channel
//! - `report`: renders a finished run as a change summary plus per-file
//!   diff fragments

pub mod compare;
pub mod report;
