//! Purpose: Compose greeting messages and write them to an output stream.
//! Exports: `Greeting`, `greet`, `greet_default`, `greet_person`, `write_greet`, `print_greet`.
//! Role: Pure formatting plus the one validation rule; stdout emission is a thin wrapper.
//! Invariants: Rendered form is always `"{greeting}, {target}!"`.
//! Invariants: A personalized greeting rejects empty or whitespace-only names.
//! Invariants: Accepted names are used verbatim (inner and outer whitespace preserved).
use std::fmt;
use std::io::{self, Write};

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::error::{Error, ErrorKind};

pub const DEFAULT_GREETING: &str = "Hello";
pub const DEFAULT_TARGET: &str = "World";

/// A greeting phrase paired with its recipient.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Greeting {
    greeting: String,
    target: String,
}

impl Greeting {
    pub fn new(greeting: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            greeting: greeting.into(),
            target: target.into(),
        }
    }

    /// Builds a personalized greeting, rejecting blank names.
    pub fn for_person(name: impl Into<String>, greeting: Option<&str>) -> Result<Self, Error> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::new(ErrorKind::InvalidArgument)
                .with_message("name cannot be empty or whitespace only"));
        }
        Ok(Self::new(greeting.unwrap_or(DEFAULT_GREETING), name))
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl Default for Greeting {
    fn default() -> Self {
        Self::new(DEFAULT_GREETING, DEFAULT_TARGET)
    }
}

impl fmt::Display for Greeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}!", self.greeting, self.target)
    }
}

impl Serialize for Greeting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Greeting", 3)?;
        state.serialize_field("greeting", &self.greeting)?;
        state.serialize_field("target", &self.target)?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}

pub fn greet(greeting: &str, target: &str) -> String {
    Greeting::new(greeting, target).message()
}

/// `"Hello, World!"`.
pub fn greet_default() -> String {
    Greeting::default().message()
}

pub fn greet_person(name: &str, greeting: Option<&str>) -> Result<String, Error> {
    Greeting::for_person(name, greeting).map(|greeting| greeting.message())
}

/// Writes the greeting followed by a newline.
pub fn write_greet<W: Write>(out: &mut W, greeting: &str, target: &str) -> Result<(), Error> {
    let message = greet(greeting, target);
    tracing::debug!(%message, "writing greeting");
    writeln!(out, "{message}")
        .and_then(|()| out.flush())
        .map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to write greeting")
                .with_source(err)
        })
}

pub fn print_greet(greeting: &str, target: &str) -> Result<(), Error> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_greet(&mut lock, greeting, target)
}
