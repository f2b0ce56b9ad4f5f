// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Interpreter backend: lowers plans into direct execution over dynamic
//! values.
//!
//! The product is a [`RecordCodec`], itself a [`Codec`], so generated
//! records nest inside lists, nullables and other records like any builtin.

use crate::codec::Codec;
use crate::descriptor::{ElementDescriptor, RecordDescriptor};
use crate::emit::{generate, PlanEmitter};
use crate::error::{GenerationError, Result, StreamError};
use crate::model::RecordType;
use crate::plan::{DecodePlan, EncodeOp, EncodePlan, FieldKind, FieldRead};
use crate::protocol::{read_codec_element, write_codec_element, Decoder, ElementToken, Encoder};
use crate::resolve::CodecRegistry;
use crate::value::Value;
use std::sync::Arc;

/// Executable codec for one record type, driven by its derived plans.
///
/// Holds whichever plans were emitted; invoking a direction that was
/// skipped at generation time is a generation error, not a stream error.
#[derive(Debug)]
pub struct RecordCodec {
    descriptor: Arc<RecordDescriptor>,
    encode: Option<EncodePlan>,
    decode: Option<DecodePlan>,
}

impl RecordCodec {
    pub fn descriptor(&self) -> &Arc<RecordDescriptor> {
        &self.descriptor
    }

    pub fn encode_plan(&self) -> Option<&EncodePlan> {
        self.encode.as_ref()
    }

    pub fn decode_plan(&self) -> Option<&DecodePlan> {
        self.decode.as_ref()
    }
}

impl Codec for RecordCodec {
    fn encode(&self, out: &mut dyn Encoder, value: &Value) -> Result<()> {
        let plan = self.encode.as_ref().ok_or_else(|| GenerationError::MissingPlan {
            record: self.descriptor.qualified_name().to_string(),
            direction: "encode",
        })?;
        run_encode(plan, out, value)
    }

    fn decode(&self, inp: &mut dyn Decoder) -> Result<Value> {
        let plan = self.decode.as_ref().ok_or_else(|| GenerationError::MissingPlan {
            record: self.descriptor.qualified_name().to_string(),
            direction: "decode",
        })?;
        run_decode(plan, inp)
    }
}

/// Execute an encode plan against a value.
pub fn run_encode(plan: &EncodePlan, out: &mut dyn Encoder, value: &Value) -> Result<()> {
    let desc = plan.descriptor().as_ref();
    let fields = value.as_record().ok_or_else(|| value.mismatch("record"))?;
    for op in plan.ops() {
        match *op {
            EncodeOp::Begin => out.write_begin(desc)?,
            EncodeOp::UnitElement { ordinal } => out.write_unit_element(desc, ordinal)?,
            EncodeOp::PrimitiveElement { ordinal, tag } => {
                let field = field_at(fields, ordinal, value)?;
                match field.as_primitive() {
                    Some(p) if p.tag() == tag => {
                        out.write_primitive_element(desc, ordinal, p)?;
                    }
                    _ => return Err(field.mismatch("primitive")),
                }
            }
            EncodeOp::CodecElement { ordinal, slot } => {
                let field = field_at(fields, ordinal, value)?;
                write_codec_element(out, desc, ordinal, plan.codec(slot).as_ref(), field)?;
            }
            EncodeOp::End => out.write_end(desc)?,
        }
    }
    Ok(())
}

fn field_at<'v>(fields: &'v [Value], ordinal: usize, whole: &Value) -> Result<&'v Value> {
    fields.get(ordinal).ok_or_else(|| whole.mismatch("record with all declared fields"))
}

/// Execute a decode plan: the state machine of the plan graph.
///
/// Every slot starts at its default, so a stream that ends early still
/// constructs from initialized storage. Fields may arrive in any order and
/// repeatedly; the last write wins. An index outside the descriptor's
/// range that is not a sentinel fails as a malformed stream.
pub fn run_decode(plan: &DecodePlan, inp: &mut dyn Decoder) -> Result<Value> {
    let desc = plan.descriptor().as_ref();
    let mut slots: Vec<Value> = plan.fields().iter().map(|f| f.default.clone()).collect();

    inp.read_begin(desc)?;
    loop {
        match inp.read_element(desc)? {
            ElementToken::All => {
                for field in plan.fields() {
                    slots[field.ordinal] = read_field(plan, field, inp)?;
                }
                break;
            }
            ElementToken::Done => break,
            ElementToken::Index(index) if index < plan.field_count() => {
                slots[index] = read_field(plan, &plan.fields()[index], inp)?;
            }
            ElementToken::Index(index) => {
                return Err(StreamError::UnknownElementIndex {
                    descriptor: desc.qualified_name().to_string(),
                    index,
                    count: plan.field_count(),
                }
                .into());
            }
        }
    }
    inp.read_end(desc)?;
    Ok(Value::Record(slots))
}

fn read_field(plan: &DecodePlan, field: &FieldRead, inp: &mut dyn Decoder) -> Result<Value> {
    let desc = plan.descriptor().as_ref();
    match field.kind {
        FieldKind::Unit => {
            inp.read_unit_element(desc, field.ordinal)?;
            Ok(Value::Unit)
        }
        FieldKind::Primitive(tag) => Ok(Value::Primitive(
            inp.read_primitive_element(desc, field.ordinal, tag)?,
        )),
        FieldKind::Codec { slot } => {
            read_codec_element(inp, desc, field.ordinal, plan.codec(slot).as_ref())
        }
    }
}

/// Backend collecting emitted plans into a [`RecordCodec`].
#[derive(Debug, Default)]
pub struct InterpBackend {
    descriptor: Option<Arc<RecordDescriptor>>,
    encode: Option<EncodePlan>,
    decode: Option<DecodePlan>,
}

impl InterpBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// The codec assembled so far, if any plan was emitted.
    pub fn into_codec(self) -> Option<RecordCodec> {
        Some(RecordCodec {
            descriptor: self.descriptor?,
            encode: self.encode,
            decode: self.decode,
        })
    }
}

impl PlanEmitter for InterpBackend {
    fn emit_descriptor(&mut self, descriptor: &Arc<RecordDescriptor>) -> Result<()> {
        self.descriptor = Some(descriptor.clone());
        Ok(())
    }

    fn emit_encode(&mut self, plan: &EncodePlan) -> Result<()> {
        self.encode = Some(plan.clone());
        Ok(())
    }

    fn emit_decode(&mut self, plan: &DecodePlan) -> Result<()> {
        self.decode = Some(plan.clone());
        Ok(())
    }
}

/// Derive an executable codec for `record` through the interpreter
/// backend. `None` when no entry point was eligible.
pub fn derive_record_codec(
    registry: &CodecRegistry,
    record: &RecordType,
) -> Result<Option<Arc<RecordCodec>>> {
    let mut backend = InterpBackend::new();
    if !generate(registry, record, &mut backend)? {
        return Ok(None);
    }
    Ok(backend.into_codec().map(Arc::new))
}
