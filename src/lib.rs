//! # serde_graphjson
//!
//! Turns arbitrary in-memory object graphs into JSON-like text without any
//! per-type encoding code: anything implementing `serde::Serialize` is
//! classified by shape and written out.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::Serialize;
//! use serde_graphjson::to_string;
//!
//! #[derive(Serialize)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     #[serde(skip)]
//!     session: Option<String>,
//!     _cache: Vec<u8>,
//! }
//!
//! let user = User {
//!     id: 1,
//!     name: "Alice".to_string(),
//!     session: Some("secret".to_string()),
//!     _cache: vec![],
//! };
//! assert_eq!(to_string(&user).unwrap(), r#"{"id":1,"name":"Alice"}"#);
//! ```
//!
//! ## Output Rules
//!
//! | Input | Output |
//! |-------|--------|
//! | `None`, `()` | `null` |
//! | `bool` | `true` / `false` |
//! | integers, floats | unquoted decimal (`1`, `1.5`, `1e21`) |
//! | `char`, `str` | quoted, escaped string |
//! | unit enum variant | quoted variant name |
//! | chrono date/time types | quoted ISO-8601 text |
//! | [`time::EpochMillis`] | quoted millisecond count (`"0"`) |
//! | maps | `{"key":value,...}` in iteration order |
//! | sequences, tuples, arrays | `[a,b,...]` |
//! | structs | `{"member":value,...}` in declaration order |
//!
//! Struct members whose name starts with `_` are skipped, as are members
//! marked `#[serde(skip)]` and members whose value cannot be read at encode
//! time.
//!
//! ## Shared Nodes and Cycles
//!
//! Owned values form trees. Graphs with shared or cyclic references are built
//! from [`Shared`] (or [`SyncShared`]) nodes, which the encoder tracks by
//! identity. Reaching a node from itself fails with [`Error::Cycle`];
//! reaching it twice from siblings simply encodes it twice.
//!
//! ```rust
//! use serde::Serialize;
//! use serde_graphjson::{to_string, Shared};
//!
//! #[derive(Serialize)]
//! struct Node {
//!     name: &'static str,
//!     next: Option<Shared<Node>>,
//! }
//!
//! let node = Shared::new(Node { name: "loop", next: None });
//! node.borrow_mut().next = Some(node.clone());
//! assert!(to_string(&node).unwrap_err().is_cycle());
//! # node.borrow_mut().next = None;
//! ```
//!
//! ## Concurrency
//!
//! Every call owns its buffer and identity set; there is no global state, so
//! the encoder may be called from any number of threads at once.

#[macro_use]
pub mod macros;

pub mod error;
pub mod map;
pub mod options;
pub mod ser;
pub mod shared;
pub mod time;
pub mod value;
mod visited;

pub use error::{Error, Result};
pub use map::Map;
pub use options::{BytesFormat, EncoderOptions, NonFiniteFloats};
pub use ser::Serializer;
pub use shared::{Shared, SyncShared, Unreadable};
pub use time::EpochMillis;
pub use value::{Number, Value};

use serde::Serialize;
use std::io;

/// Encode any `T: Serialize` to a string.
///
/// # Examples
///
/// ```rust
/// use serde_graphjson::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), r#"{"x":1,"y":2}"#);
/// ```
///
/// # Errors
///
/// Returns [`Error::Cycle`] if a shared node is reachable from itself.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, EncoderOptions::default())
}

/// Encode any `T: Serialize` to a string with custom options.
///
/// # Errors
///
/// Returns [`Error::Cycle`] if a shared node is reachable from itself, or
/// [`Error::NonFiniteFloat`] when [`NonFiniteFloats::Error`] is selected.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: EncoderOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new(options);
    serializer.encode(value)?;
    let output = serializer.into_inner();
    tracing::trace!(len = output.len(), "encoded value");
    Ok(output)
}

/// Encode any `T: Serialize` to UTF-8 bytes.
///
/// # Errors
///
/// Same as [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    to_string(value).map(String::into_bytes)
}

/// Encode any `T: Serialize` and write the text to `writer`.
///
/// The full text is produced before anything is written, so a cycle error
/// leaves the writer untouched.
///
/// # Examples
///
/// ```rust
/// use serde_graphjson::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &vec!["a", "b"]).unwrap();
/// assert_eq!(buffer, br#"["a","b"]"#);
/// ```
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, EncoderOptions::default())
}

/// Encode any `T: Serialize` with custom options and write the text to
/// `writer`.
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(
    mut writer: W,
    value: &T,
    options: EncoderOptions,
) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}
