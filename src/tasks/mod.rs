//! Background Tasks Module
//!
//! Opt-in background work for a shared cache.
//!
//! # Tasks
//! - Expiry sweep: purges expired entries at a fixed interval so their
//!   memory is reclaimed without waiting for the next `put`

mod sweeper;

pub use sweeper::spawn_sweep_task;
