//! I/O helpers for the preview loop.

pub mod builder;
pub mod config;
pub mod process;
pub mod target;
