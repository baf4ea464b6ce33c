//! Error types for graph encoding.
//!
//! Encoding has exactly one data-integrity failure, [`Error::Cycle`], raised
//! when a shared node is reached again while it is still being encoded.
//! Everything else is either configuration driven
//! ([`Error::NonFiniteFloat`]), an I/O failure from the writer helpers, or a
//! custom error raised by a hand-written `Serialize` impl.
//!
//! ## Examples
//!
//! ```rust
//! use serde_graphjson::{to_string, Error, Shared};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Node {
//!     next: Option<Shared<Node>>,
//! }
//!
//! let node = Shared::new(Node { next: None });
//! node.borrow_mut().next = Some(node.clone());
//!
//! let err = to_string(&node).unwrap_err();
//! assert!(err.is_cycle());
//! # node.borrow_mut().next = None;
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A shared node was reached again while still on the active path.
    #[error("cycle detected while encoding: {type_name} at {address:#x} is already being encoded")]
    Cycle {
        type_name: &'static str,
        address: usize,
    },

    /// A NaN or infinite float met [`NonFiniteFloats::Error`](crate::NonFiniteFloats::Error).
    #[error("cannot encode non-finite float {0}")]
    NonFiniteFloat(f64),

    /// IO error during writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),

    /// A member could not be read. Converted into "member absent" by the
    /// encoder and never returned from the top-level functions.
    #[doc(hidden)]
    #[error("member could not be read")]
    Unreadable,
}

impl Error {
    /// Creates a cycle error for the node of type `type_name` at `address`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_graphjson::Error;
    ///
    /// let err = Error::cycle("Node", 0x10);
    /// assert!(err.to_string().contains("Node at 0x10"));
    /// ```
    pub fn cycle(type_name: &'static str, address: usize) -> Self {
        Error::Cycle {
            type_name,
            address,
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_graphjson::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` if this error reports a reference cycle.
    #[must_use]
    pub const fn is_cycle(&self) -> bool {
        matches!(self, Error::Cycle { .. })
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_display() {
        let err = Error::cycle("my_crate::Node", 255);
        assert!(err.is_cycle());
        assert_eq!(
            err.to_string(),
            "cycle detected while encoding: my_crate::Node at 0xff is already being encoded"
        );
    }

    #[test]
    fn test_other_errors_are_not_cycles() {
        assert!(!Error::custom("boom").is_cycle());
        assert!(!Error::NonFiniteFloat(f64::NAN).is_cycle());
        assert!(Error::io("closed").to_string().contains("closed"));
    }
}
