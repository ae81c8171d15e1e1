//! Purpose: Define the public Rust API boundary for `hello`.
//! Exports: Greeting operations, the `Greeting` value, and error types.
//! Role: Public, additive-only surface; hides internal module layout.
//! Invariants: This module is the only public path to the core modules.

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::greeting::{
    DEFAULT_GREETING, DEFAULT_TARGET, Greeting, greet, greet_default, greet_person, print_greet,
    write_greet,
};
