// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Plan derivation: the ordered operation plans a backend lowers into an
//! executable encode/decode pair.
//!
//! Plans are immutable once built and reference storage only symbolically:
//! field ordinals and slots into a shared codec table. The per-field choice
//! between a raw primitive write and a delegated codec is fixed here, once,
//! and is identical in both plans; the decode side can then always read
//! with the exact kind the encode side wrote.
//!
//! The encode plan is a flat sequence. The decode plan is a small graph —
//! entry, one state per field, terminal — captured as the descriptor plus
//! ordered [`FieldRead`] states; the dispatch loop connecting them is the
//! backend's to lower (see [`crate::emit`]).

use crate::codec::Codec;
use crate::descriptor::RecordDescriptor;
use crate::error::{GenerationError, Result};
use crate::model::{BaseType, Field, RecordType};
use crate::resolve::{CodecRegistry, Resolver};
use crate::value::{PrimitiveTag, Value};
use std::sync::Arc;

/// How one field's value travels: raw unit, raw primitive, or through a
/// delegated codec in the plan's codec table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Unit,
    Primitive(PrimitiveTag),
    Codec { slot: usize },
}

/// One abstract encode operation over symbolic slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeOp {
    /// Open the structure for the plan's descriptor.
    Begin,
    /// Element announcement for a unit field; no instance payload follows.
    UnitElement { ordinal: usize },
    /// Element announcement plus the field's raw primitive value.
    PrimitiveElement { ordinal: usize, tag: PrimitiveTag },
    /// Element announcement plus a delegated codec write. A nullable
    /// wrapper occupies the slot as one composed unit.
    CodecElement { ordinal: usize, slot: usize },
    /// Close the structure.
    End,
}

/// Flat encode plan in declaration order.
#[derive(Debug, Clone)]
pub struct EncodePlan {
    descriptor: Arc<RecordDescriptor>,
    ops: Vec<EncodeOp>,
    codecs: Vec<Arc<dyn Codec>>,
}

impl EncodePlan {
    pub fn descriptor(&self) -> &Arc<RecordDescriptor> {
        &self.descriptor
    }

    pub fn ops(&self) -> &[EncodeOp] {
        &self.ops
    }

    pub fn codec(&self, slot: usize) -> &Arc<dyn Codec> {
        &self.codecs[slot]
    }
}

/// Per-field decode state: how to read the field and what its slot holds
/// before the stream supplies a value.
#[derive(Debug, Clone)]
pub struct FieldRead {
    pub ordinal: usize,
    pub kind: FieldKind,
    /// Zero/default value pre-filling the slot, so a stream that never
    /// mentions this field still constructs from initialized storage.
    pub default: Value,
}

/// Decode plan: the state machine graph.
///
/// States are `INIT -> READ_BEGIN -> DISPATCH -> {F0..Fn-1} -> READ_END ->
/// CONSTRUCT`. Dispatch queries the protocol's element negotiation; an
/// ordinal enters that field's state which loops back to dispatch, the
/// "all" sentinel reads every field in declaration order with no further
/// negotiation, and "done" proceeds to the end hook. CONSTRUCT supplies
/// the stored slots positionally, in declaration order.
#[derive(Debug, Clone)]
pub struct DecodePlan {
    descriptor: Arc<RecordDescriptor>,
    fields: Vec<FieldRead>,
    codecs: Vec<Arc<dyn Codec>>,
}

impl DecodePlan {
    pub fn descriptor(&self) -> &Arc<RecordDescriptor> {
        &self.descriptor
    }

    pub fn fields(&self) -> &[FieldRead] {
        &self.fields
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn codec(&self, slot: usize) -> &Arc<dyn Codec> {
        &self.codecs[slot]
    }
}

/// Derivation product for one record type: descriptor plus both plans,
/// safe to share across unlimited invocations.
#[derive(Debug, Clone)]
pub struct RecordPlans {
    pub descriptor: Arc<RecordDescriptor>,
    pub encode: EncodePlan,
    pub decode: DecodePlan,
}

/// Builds both plans from an ordered field list with resolved codecs.
#[derive(Debug, Clone, Copy)]
pub struct PlanBuilder<'a> {
    registry: &'a CodecRegistry,
}

enum Classified {
    Unit,
    Primitive(PrimitiveTag),
    Delegated(Arc<dyn Codec>),
}

impl<'a> PlanBuilder<'a> {
    pub fn new(registry: &'a CodecRegistry) -> Self {
        Self { registry }
    }

    /// Derive the descriptor and both plans for `record`.
    pub fn derive(&self, record: &RecordType) -> Result<RecordPlans> {
        let descriptor = Arc::new(RecordDescriptor::new(
            record.qualified_name(),
            record.fields().iter().map(|f| f.name.clone()),
        ));

        let mut codecs: Vec<Arc<dyn Codec>> = Vec::new();
        let mut kinds: Vec<FieldKind> = Vec::new();
        for field in record.fields() {
            let kind = match self.classify(record, field)? {
                Classified::Unit => FieldKind::Unit,
                Classified::Primitive(tag) => FieldKind::Primitive(tag),
                Classified::Delegated(codec) => {
                    let slot = codecs.len();
                    codecs.push(codec);
                    FieldKind::Codec { slot }
                }
            };
            kinds.push(kind);
        }

        let mut ops = Vec::with_capacity(record.fields().len() + 2);
        ops.push(EncodeOp::Begin);
        for (field, kind) in record.fields().iter().zip(&kinds) {
            ops.push(match *kind {
                FieldKind::Unit => EncodeOp::UnitElement {
                    ordinal: field.ordinal,
                },
                FieldKind::Primitive(tag) => EncodeOp::PrimitiveElement {
                    ordinal: field.ordinal,
                    tag,
                },
                FieldKind::Codec { slot } => EncodeOp::CodecElement {
                    ordinal: field.ordinal,
                    slot,
                },
            });
        }
        ops.push(EncodeOp::End);

        let fields = record
            .fields()
            .iter()
            .zip(&kinds)
            .map(|(field, kind)| FieldRead {
                ordinal: field.ordinal,
                kind: *kind,
                default: match kind {
                    FieldKind::Unit => Value::Unit,
                    FieldKind::Primitive(tag) => Value::Primitive(tag.default_value()),
                    FieldKind::Codec { .. } => Value::Null,
                },
            })
            .collect();

        Ok(RecordPlans {
            descriptor: descriptor.clone(),
            encode: EncodePlan {
                descriptor: descriptor.clone(),
                ops,
                codecs: codecs.clone(),
            },
            decode: DecodePlan {
                descriptor,
                fields,
                codecs,
            },
        })
    }

    /// Fix the primitive-vs-delegated choice for one field.
    ///
    /// Unit and true primitive/text shapes bypass resolution entirely when
    /// they carry no override and no nullability; everything else must
    /// resolve a codec or the record cannot be generated for this field.
    fn classify(&self, record: &RecordType, field: &Field) -> Result<Classified> {
        let ty = &field.declared_type;
        if field.codec_override.is_none() && !ty.nullable {
            if let Some(tag) = ty.base.primitive_tag() {
                return Ok(Classified::Primitive(tag));
            }
            if ty.base == BaseType::Unit {
                return Ok(Classified::Unit);
            }
        }
        Resolver::new(self.registry)
            .resolve(ty, field.codec_override.as_ref())
            .map(Classified::Delegated)
            .ok_or_else(|| {
                GenerationError::UnresolvableField {
                    record: record.qualified_name().to_string(),
                    field: field.name.clone(),
                }
                .into()
            })
    }
}
