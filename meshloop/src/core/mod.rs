//! Deterministic, pure logic shared by the preview loop.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! settings and captured text and return deterministic outputs suitable for tests.

pub mod command;
pub mod extract;
pub mod settings;
