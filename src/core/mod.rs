// Core modules implementing greeting composition and error modeling.
pub mod error;
pub mod greeting;
