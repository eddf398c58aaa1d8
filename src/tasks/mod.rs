//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of the process.
//!
//! # Tasks
//! - Cache reaper: removes expired cache entries every reap period

mod reaper;

pub use reaper::spawn_reaper_task;
