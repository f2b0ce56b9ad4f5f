// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codecs: paired encode/decode logic for one type, driven against the
//! streaming protocol.
//!
//! Builtin codecs cover the primitive and text shapes, the unit value and
//! enums; `nullable` supplies the decorator composing with any inner codec;
//! `list` is the sequence composite with its reserved size index.

pub mod builtin;
pub mod list;
pub mod nullable;

pub use builtin::{enum_codec, primitive_codec, EnumCodec, PrimitiveCodec, UnitCodec, UNIT_CODEC};
pub use list::{ListCodec, ListDescriptor, LIST_DESCRIPTOR, SIZE_INDEX};
pub use nullable::{make_nullable, NullableCodec};

use crate::error::Result;
use crate::protocol::{Decoder, Encoder};
use crate::value::Value;

/// Paired encode/decode logic for one type.
///
/// A codec owns its protocol interaction completely: composites bracket
/// their own `begin`/`end`, primitives write a single value. Codecs are
/// immutable and shareable; all per-call state lives in the protocol
/// instance.
pub trait Codec: std::fmt::Debug + Send + Sync {
    fn encode(&self, out: &mut dyn Encoder, value: &Value) -> Result<()>;
    fn decode(&self, inp: &mut dyn Decoder) -> Result<Value>;
}
