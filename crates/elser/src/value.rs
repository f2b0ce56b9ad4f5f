// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic values the interpreter backend executes against.

use crate::error::Error;

/// Tag naming a primitive shape without carrying a value.
///
/// The tag chosen during resolution is baked into both the encode and the
/// decode plan for a field, which is what keeps the two sides agreed on the
/// primitive-vs-codec kind for every ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveTag {
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Char,
    Str,
}

impl PrimitiveTag {
    /// The zero/default value for this shape, used to pre-fill decode slots.
    pub fn default_value(&self) -> Primitive {
        match self {
            Self::Bool => Primitive::Bool(false),
            Self::I8 => Primitive::I8(0),
            Self::I16 => Primitive::I16(0),
            Self::I32 => Primitive::I32(0),
            Self::I64 => Primitive::I64(0),
            Self::F32 => Primitive::F32(0.0),
            Self::F64 => Primitive::F64(0.0),
            Self::Char => Primitive::Char('\0'),
            Self::Str => Primitive::Str(String::new()),
        }
    }
}

/// A primitive value travelling through the streaming protocol.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Char(char),
    Str(String),
}

impl Primitive {
    pub fn tag(&self) -> PrimitiveTag {
        match self {
            Self::Bool(_) => PrimitiveTag::Bool,
            Self::I8(_) => PrimitiveTag::I8,
            Self::I16(_) => PrimitiveTag::I16,
            Self::I32(_) => PrimitiveTag::I32,
            Self::I64(_) => PrimitiveTag::I64,
            Self::F32(_) => PrimitiveTag::F32,
            Self::F64(_) => PrimitiveTag::F64,
            Self::Char(_) => PrimitiveTag::Char,
            Self::Str(_) => PrimitiveTag::Str,
        }
    }
}

/// A dynamic value: primitive, unit, null, enum constant or composite.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Primitive(Primitive),
    Unit,
    Null,
    /// Enum constant identified by its declaration ordinal.
    Enum(u32),
    List(Vec<Value>),
    /// Record fields in declaration order (positional, matching CONSTRUCT).
    Record(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short kind name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Primitive(Primitive::Bool(_)) => "bool",
            Self::Primitive(Primitive::I8(_)) => "i8",
            Self::Primitive(Primitive::I16(_)) => "i16",
            Self::Primitive(Primitive::I32(_)) => "i32",
            Self::Primitive(Primitive::I64(_)) => "i64",
            Self::Primitive(Primitive::F32(_)) => "f32",
            Self::Primitive(Primitive::F64(_)) => "f64",
            Self::Primitive(Primitive::Char(_)) => "char",
            Self::Primitive(Primitive::Str(_)) => "string",
            Self::Unit => "unit",
            Self::Null => "null",
            Self::Enum(_) => "enum",
            Self::List(_) => "list",
            Self::Record(_) => "record",
        }
    }

    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Self::Primitive(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&[Value]> {
        match self {
            Self::Record(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_enum_ordinal(&self) -> Option<u32> {
        match self {
            Self::Enum(ordinal) => Some(*ordinal),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Primitive(Primitive::I32(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Primitive(Primitive::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Mismatch error naming the expected shape and this value's kind.
    pub fn mismatch(&self, expected: &'static str) -> Error {
        Error::ValueMismatch {
            expected,
            found: self.kind_name().to_string(),
        }
    }
}

impl From<Primitive> for Value {
    fn from(p: Primitive) -> Self {
        Self::Primitive(p)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Primitive(Primitive::Bool(v))
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Self::Primitive(Primitive::I8(v))
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Self::Primitive(Primitive::I16(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Primitive(Primitive::I32(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Primitive(Primitive::I64(v))
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Primitive(Primitive::F32(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Primitive(Primitive::F64(v))
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Self::Primitive(Primitive::Char(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Primitive(Primitive::Str(v.to_string()))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Primitive(Primitive::Str(v))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}
