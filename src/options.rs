//! Configuration options for encoding.
//!
//! - [`EncoderOptions`]: Main configuration struct
//! - [`NonFiniteFloats`]: What to do with NaN and the infinities
//! - [`BytesFormat`]: How byte slices are written
//!
//! ## Examples
//!
//! ```rust
//! use serde_graphjson::{to_string_with_options, EncoderOptions, NonFiniteFloats};
//!
//! let options = EncoderOptions::new().with_non_finite(NonFiniteFloats::Literal);
//! let text = to_string_with_options(&vec![1.5, f64::INFINITY], options).unwrap();
//! assert_eq!(text, "[1.5,Infinity]");
//! ```

/// Handling of NaN, `inf` and `-inf`.
///
/// JSON has no token for these values, so the default writes `null`.
///
/// # Examples
///
/// ```rust
/// use serde_graphjson::NonFiniteFloats;
///
/// assert_eq!(NonFiniteFloats::default(), NonFiniteFloats::Null);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NonFiniteFloats {
    /// Write `null`.
    #[default]
    Null,
    /// Write `NaN`, `Infinity` or `-Infinity` unquoted. Not valid JSON.
    Literal,
    /// Fail with [`Error::NonFiniteFloat`](crate::Error::NonFiniteFloat).
    Error,
}

/// Output form of byte slices (`serialize_bytes`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BytesFormat {
    /// An array of numbers, like any other fixed-size block.
    #[default]
    Array,
    /// A quoted lowercase hex string.
    Hex,
}

/// Configuration options for the encoder.
///
/// # Examples
///
/// ```rust
/// use serde_graphjson::{BytesFormat, EncoderOptions, NonFiniteFloats};
///
/// let options = EncoderOptions::new()
///     .with_non_finite(NonFiniteFloats::Error)
///     .with_bytes(BytesFormat::Hex);
/// assert_eq!(options.bytes, BytesFormat::Hex);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncoderOptions {
    pub non_finite: NonFiniteFloats,
    pub bytes: BytesFormat,
}

impl EncoderOptions {
    /// Creates default options (`null` for non-finite floats, bytes as arrays).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how non-finite floats are written.
    #[must_use]
    pub fn with_non_finite(mut self, non_finite: NonFiniteFloats) -> Self {
        self.non_finite = non_finite;
        self
    }

    /// Sets how byte slices are written.
    #[must_use]
    pub fn with_bytes(mut self, bytes: BytesFormat) -> Self {
        self.bytes = bytes;
        self
    }
}
