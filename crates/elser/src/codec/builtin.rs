// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Builtin codecs for primitives, text, the unit value and enums.

use crate::codec::Codec;
use crate::error::Result;
use crate::model::EnumType;
use crate::protocol::{Decoder, Encoder};
use crate::value::{PrimitiveTag, Value};
use std::sync::Arc;

/// Codec for one primitive or text shape.
///
/// A single parametrized struct stands in for the per-type singleton family:
/// the tag fixes which value shape is accepted and which protocol read is
/// issued.
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveCodec {
    tag: PrimitiveTag,
}

impl PrimitiveCodec {
    pub const fn new(tag: PrimitiveTag) -> Self {
        Self { tag }
    }

    pub fn tag(&self) -> PrimitiveTag {
        self.tag
    }
}

impl Codec for PrimitiveCodec {
    fn encode(&self, out: &mut dyn Encoder, value: &Value) -> Result<()> {
        match value.as_primitive() {
            Some(p) if p.tag() == self.tag => out.write_primitive_value(p),
            _ => Err(value.mismatch("primitive")),
        }
    }

    fn decode(&self, inp: &mut dyn Decoder) -> Result<Value> {
        Ok(Value::Primitive(inp.read_primitive_value(self.tag)?))
    }
}

/// Shared primitive codec instance for a tag.
pub fn primitive_codec(tag: PrimitiveTag) -> Arc<dyn Codec> {
    Arc::new(PrimitiveCodec::new(tag))
}

/// Codec for the unit value: no payload on the wire beyond the unit marker.
#[derive(Debug, Clone, Copy)]
pub struct UnitCodec;

/// The shared unit codec instance.
pub static UNIT_CODEC: UnitCodec = UnitCodec;

impl Codec for UnitCodec {
    fn encode(&self, out: &mut dyn Encoder, value: &Value) -> Result<()> {
        match value {
            Value::Unit => out.write_unit_value(),
            other => Err(other.mismatch("unit")),
        }
    }

    fn decode(&self, inp: &mut dyn Decoder) -> Result<Value> {
        inp.read_unit_value()?;
        Ok(Value::Unit)
    }
}

/// Fallback codec for enum types.
///
/// Instantiated in a special way: it is parametrized by the enum's runtime
/// type handle, not by child codecs.
#[derive(Debug, Clone)]
pub struct EnumCodec {
    ty: Arc<EnumType>,
}

impl EnumCodec {
    pub fn new(ty: Arc<EnumType>) -> Self {
        Self { ty }
    }

    pub fn enum_type(&self) -> &Arc<EnumType> {
        &self.ty
    }
}

impl Codec for EnumCodec {
    fn encode(&self, out: &mut dyn Encoder, value: &Value) -> Result<()> {
        match value.as_enum_ordinal() {
            Some(ordinal) => out.write_enum_value(&self.ty, ordinal),
            None => Err(value.mismatch("enum")),
        }
    }

    fn decode(&self, inp: &mut dyn Decoder) -> Result<Value> {
        Ok(Value::Enum(inp.read_enum_value(&self.ty)?))
    }
}

/// Shared enum codec instance for a type handle.
pub fn enum_codec(ty: Arc<EnumType>) -> Arc<dyn Codec> {
    Arc::new(EnumCodec::new(ty))
}
