//! Graph encoding.
//!
//! This module provides the [`Serializer`] that turns any `T: Serialize` into
//! JSON-like text.
//!
//! ## Overview
//!
//! Each serde callback maps onto one output category:
//!
//! - **Null**: `None`, `()` → `null`
//! - **Scalars**: booleans and numbers unquoted, characters and strings quoted
//! - **Enum constants**: unit variants → their quoted name
//! - **Mappings**: `{"key":value,...}` in the source's iteration order
//! - **Sequences / fixed blocks**: `[a,b,...]`
//! - **Objects**: structs → `{"member":value,...}` in declaration order,
//!   skipping members whose name starts with `_` and members that cannot be
//!   read
//!
//! Shared nodes ([`Shared`](crate::Shared), [`SyncShared`](crate::SyncShared))
//! are tracked by identity while they are on the active path; meeting one
//! again fails with [`Error::Cycle`].
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use serde_graphjson::{EncoderOptions, Serializer};
//!
//! let mut serializer = Serializer::new(EncoderOptions::new());
//! serializer.encode(&vec![1, 2, 3]).unwrap();
//! assert_eq!(serializer.into_inner(), "[1,2,3]");
//! ```

use crate::options::{BytesFormat, NonFiniteFloats};
use crate::shared::{SHARED_TOKEN, UNREADABLE_TOKEN};
use crate::value::BIG_NUMBER_TOKEN;
use crate::visited::VisitedSet;
use crate::{EncoderOptions, Error, Result};
use serde::{ser, Serialize};
use std::fmt;

/// The graph encoder.
///
/// Owns the output buffer and the set of shared nodes on the active path.
/// Create one per top-level value; [`crate::to_string`] does exactly that.
pub struct Serializer {
    output: String,
    options: EncoderOptions,
    visited: VisitedSet,
}

impl Serializer {
    pub fn new(options: EncoderOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
            visited: VisitedSet::new(),
        }
    }

    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Encodes a top-level value. An unreadable root is written as `null`.
    ///
    /// Each call replaces the text of the previous one. When encoding fails
    /// the output is left empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cycle`] when a shared node is reached from itself, or
    /// any error raised by the value's `Serialize` impl.
    pub fn encode<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.output.clear();
        let result = self.write_element(value);
        debug_assert!(self.visited.is_empty());
        if result.is_err() {
            self.output.clear();
        }
        result
    }

    /// Writes `value`, rewinding the output and returning `Ok(false)` if it
    /// turned out to be unreadable.
    fn write_member<T>(&mut self, value: &T) -> Result<bool>
    where
        T: ?Sized + Serialize,
    {
        let mark = self.output.len();
        match value.serialize(&mut *self) {
            Ok(()) => Ok(true),
            Err(Error::Unreadable) => {
                self.output.truncate(mark);
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    fn write_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if !self.write_member(value)? {
            self.output.push_str("null");
        }
        Ok(())
    }

    /// Keys are coerced to text: quoted output is kept verbatim, anything
    /// else (`1`, `true`, `[1,2]`) is quoted. Returns `Ok(false)` with nothing
    /// written if the key is unreadable.
    fn write_key<T>(&mut self, key: &T) -> Result<bool>
    where
        T: ?Sized + Serialize,
    {
        let mark = self.output.len();
        if !self.write_member(key)? {
            return Ok(false);
        }
        if !self.output[mark..].starts_with('"') {
            let raw = self.output.split_off(mark);
            write_quoted(&mut self.output, &raw);
        }
        Ok(true)
    }

    fn write_float<F>(&mut self, v: F, wide: f64) -> Result<()>
    where
        F: fmt::Debug,
    {
        if wide.is_finite() {
            // `{:?}` is the shortest round-trip form and keeps a `.0` on
            // integral values.
            self.output.push_str(&format!("{:?}", v));
            return Ok(());
        }
        match self.options.non_finite {
            NonFiniteFloats::Null => self.output.push_str("null"),
            NonFiniteFloats::Literal => self.output.push_str(if wide.is_nan() {
                "NaN"
            } else if wide.is_sign_positive() {
                "Infinity"
            } else {
                "-Infinity"
            }),
            NonFiniteFloats::Error => return Err(Error::NonFiniteFloat(wide)),
        }
        Ok(())
    }

    fn open_variant(&mut self, variant: &str) {
        self.output.push('{');
        write_quoted(&mut self.output, variant);
        self.output.push(':');
    }

    fn enter_shared<T>(&mut self, node: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let address = (node as *const T).cast::<()>() as usize;
        if !self.visited.enter(address) {
            let type_name = std::any::type_name::<T>();
            tracing::debug!(address, type_name, "reference cycle detected");
            return Err(Error::cycle(type_name, address));
        }
        let result = node.serialize(&mut *self);
        self.visited.leave(address);
        result
    }
}

/// Writes `s` as a quoted string.
///
/// `"` and `\` are backslash-escaped, the control characters with a short form
/// use it (`\b \f \n \r \t`), other code points below 0x20 become `\u00XX`
/// with lowercase hex. Everything else, including non-ASCII text, is copied
/// unchanged.
pub fn write_quoted(out: &mut String, s: &str) {
    out.reserve(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = SeqSerializer<'a>;
    type SerializeTuple = SeqSerializer<'a>;
    type SerializeTupleStruct = SeqSerializer<'a>;
    type SerializeTupleVariant = SeqSerializer<'a>;
    type SerializeMap = MapSerializer<'a>;
    type SerializeStruct = StructSerializer<'a>;
    type SerializeStructVariant = StructSerializer<'a>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        self.output.push_str(if v { "true" } else { "false" });
        Ok(())
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok> {
        self.output.push_str(&v.to_string());
        Ok(())
    }

    fn serialize_i128(self, v: i128) -> Result<Self::Ok> {
        self.output.push_str(&v.to_string());
        Ok(())
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
        self.output.push_str(&v.to_string());
        Ok(())
    }

    fn serialize_u128(self, v: u128) -> Result<Self::Ok> {
        self.output.push_str(&v.to_string());
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        self.write_float(v, v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        self.write_float(v, v)
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        write_quoted(&mut self.output, v.encode_utf8(&mut [0; 4]));
        Ok(())
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        write_quoted(&mut self.output, v);
        Ok(())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
        match self.options.bytes {
            BytesFormat::Array => {
                use ser::SerializeSeq;
                let mut seq = self.serialize_seq(Some(v.len()))?;
                for byte in v {
                    seq.serialize_element(byte)?;
                }
                seq.end()
            }
            BytesFormat::Hex => {
                write_quoted(&mut self.output, &hex::encode(v));
                Ok(())
            }
        }
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        self.serialize_unit()
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        self.output.push_str("null");
        Ok(())
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Self::Ok> {
        if name == UNREADABLE_TOKEN {
            return Err(Error::Unreadable);
        }
        // an object without members
        self.output.push_str("{}");
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        if name == SHARED_TOKEN {
            return self.enter_shared(value);
        }
        if name == BIG_NUMBER_TOKEN {
            // the digits arrive as a string; write them unquoted
            let mark = self.output.len();
            value.serialize(&mut *self)?;
            let quoted = self.output.split_off(mark);
            self.output.push_str(quoted.trim_matches('"'));
            return Ok(());
        }
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        self.open_variant(variant);
        self.write_element(value)?;
        self.output.push('}');
        Ok(())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        self.output.push('[');
        Ok(SeqSerializer {
            ser: self,
            first: true,
            variant: false,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        self.open_variant(variant);
        self.output.push('[');
        Ok(SeqSerializer {
            ser: self,
            first: true,
            variant: true,
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        self.output.push('{');
        Ok(MapSerializer {
            ser: self,
            first: true,
            // derived structs with flattened members arrive here without a
            // length and keep the member selection rules
            members: len.is_none(),
            pending: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        self.output.push('{');
        Ok(StructSerializer {
            ser: self,
            first: true,
            variant: false,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        self.open_variant(variant);
        self.output.push('{');
        Ok(StructSerializer {
            ser: self,
            first: true,
            variant: true,
        })
    }
}

/// Sequences, tuples and tuple variants.
pub struct SeqSerializer<'a> {
    ser: &'a mut Serializer,
    first: bool,
    variant: bool,
}

impl<'a> SeqSerializer<'a> {
    fn element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if !self.first {
            self.ser.output.push(',');
        }
        self.first = false;
        self.ser.write_element(value)
    }

    fn finish(self) -> Result<()> {
        self.ser.output.push(']');
        if self.variant {
            self.ser.output.push('}');
        }
        Ok(())
    }
}

impl<'a> ser::SerializeSeq for SeqSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl<'a> ser::SerializeTuple for SeqSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl<'a> ser::SerializeTupleStruct for SeqSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl<'a> ser::SerializeTupleVariant for SeqSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

/// Mappings. An entry whose key or value is unreadable is dropped as a whole.
///
/// A map opened without a length is treated as struct members, so keys
/// starting with `_` are dropped too.
pub struct MapSerializer<'a> {
    ser: &'a mut Serializer,
    first: bool,
    members: bool,
    pending: Option<Entry>,
}

enum Entry {
    /// Key written; holds the output length before the entry started.
    Open(usize),
    Skipped,
}

impl<'a> ser::SerializeMap for MapSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let mark = self.ser.output.len();
        if !self.first {
            self.ser.output.push(',');
        }
        let key_start = self.ser.output.len();
        let written = self.ser.write_key(key)?;
        if !written || (self.members && self.ser.output[key_start..].starts_with("\"_")) {
            tracing::trace!(readable = written, "omitting map entry");
            self.ser.output.truncate(mark);
            self.pending = Some(Entry::Skipped);
            return Ok(());
        }
        self.ser.output.push(':');
        self.pending = Some(Entry::Open(mark));
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let mark = match self.pending.take() {
            Some(Entry::Open(mark)) => mark,
            Some(Entry::Skipped) => return Ok(()),
            None => return Err(Error::custom("serialize_value called without serialize_key")),
        };
        if self.ser.write_member(value)? {
            self.first = false;
        } else {
            tracing::trace!("omitting unreadable map entry");
            self.ser.output.truncate(mark);
        }
        Ok(())
    }

    fn end(self) -> Result<Self::Ok> {
        self.ser.output.push('}');
        Ok(())
    }
}

/// Structs and struct variants.
pub struct StructSerializer<'a> {
    ser: &'a mut Serializer,
    first: bool,
    variant: bool,
}

impl<'a> StructSerializer<'a> {
    fn member<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if key.starts_with('_') {
            return Ok(());
        }
        let mark = self.ser.output.len();
        if !self.first {
            self.ser.output.push(',');
        }
        write_quoted(&mut self.ser.output, key);
        self.ser.output.push(':');
        if self.ser.write_member(value)? {
            self.first = false;
        } else {
            tracing::trace!(member = key, "omitting unreadable member");
            self.ser.output.truncate(mark);
        }
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.ser.output.push('}');
        if self.variant {
            self.ser.output.push('}');
        }
        Ok(())
    }
}

impl<'a> ser::SerializeStruct for StructSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.member(key, value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl<'a> ser::SerializeStructVariant for StructSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.member(key, value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}
