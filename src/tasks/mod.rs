//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry sweep: proactively removes expired cache entries at a fixed
//!   interval so keys that are written but never re-read cannot pile up

mod cleanup;

pub use cleanup::spawn_sweep_task;
