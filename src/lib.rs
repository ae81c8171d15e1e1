//! Purpose: Greeting library crate used by the `hello` CLI and tests.
//! Exports: `api` (greeting composition, output helpers, errors).
//! Role: Library backing the binary; `api` is the public surface.
//! Invariants: Library functions return `Result` and never terminate the process.
pub mod api;
mod core;
