//! Build-launch-feedback loop for an interactive preview executable.
//!
//! `meshloop` rebuilds the target, runs it, and feeds the camera, seed and tick
//! settings it prints back into the next invocation. The architecture keeps a
//! strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (settings, command assembly,
//!   extraction). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config, build and target processes).
//!   Behind traits so tests can script them.
//!
//! [`looping`] coordinates the two to implement the CLI.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod looping;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
