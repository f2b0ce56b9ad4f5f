// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural streaming protocol: the abstract contract concrete wire
//! formats implement.
//!
//! The contract is symmetric. A writer brackets every structure with
//! `write_begin`/`write_end` and, per element, announces the ordinal with
//! `write_element` before exactly one value operation. A reader drives its
//! side through `read_element`, which either selects an ordinal or returns
//! one of the two sentinels: [`ElementToken::All`] ("the remaining elements
//! are present in declaration order, no further negotiation") or
//! [`ElementToken::Done`] ("no more elements").
//!
//! A format is free to choose physical ordering, omit default values, or
//! use random access, as long as it honors the sentinel semantics. The
//! element-level operations have default bodies composing `write_element` /
//! the negotiated ordinal with the plain value operations; formats with
//! random access can override them and use the descriptor + index instead.

use crate::codec::Codec;
use crate::descriptor::ElementDescriptor;
use crate::error::Result;
use crate::model::EnumType;
use crate::value::{Primitive, PrimitiveTag, Value};

/// Outcome of an element negotiation on the read side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementToken {
    /// A specific element ordinal.
    Index(usize),
    /// All remaining elements follow in declaration order.
    All,
    /// No more elements.
    Done,
}

/// Writer side of the protocol.
pub trait Encoder {
    fn write_begin(&mut self, desc: &dyn ElementDescriptor) -> Result<()>;
    fn write_end(&mut self, desc: &dyn ElementDescriptor) -> Result<()>;

    /// Announce the next element's ordinal.
    fn write_element(&mut self, desc: &dyn ElementDescriptor, index: usize) -> Result<()>;

    fn write_primitive_value(&mut self, value: &Primitive) -> Result<()>;
    fn write_unit_value(&mut self) -> Result<()>;
    fn write_enum_value(&mut self, ty: &EnumType, ordinal: u32) -> Result<()>;

    /// Mark that a nullable value is present; its payload follows.
    fn write_not_null_mark(&mut self) -> Result<()>;
    /// Write a null; no payload follows.
    fn write_null_value(&mut self) -> Result<()>;

    fn write_primitive_element(
        &mut self,
        desc: &dyn ElementDescriptor,
        index: usize,
        value: &Primitive,
    ) -> Result<()> {
        self.write_element(desc, index)?;
        self.write_primitive_value(value)
    }

    fn write_unit_element(&mut self, desc: &dyn ElementDescriptor, index: usize) -> Result<()> {
        self.write_element(desc, index)?;
        self.write_unit_value()
    }
}

/// Reader side of the protocol.
pub trait Decoder {
    fn read_begin(&mut self, desc: &dyn ElementDescriptor) -> Result<()>;
    fn read_end(&mut self, desc: &dyn ElementDescriptor) -> Result<()>;

    /// Negotiate the next element: an ordinal or a sentinel.
    fn read_element(&mut self, desc: &dyn ElementDescriptor) -> Result<ElementToken>;

    fn read_primitive_value(&mut self, tag: PrimitiveTag) -> Result<Primitive>;
    fn read_unit_value(&mut self) -> Result<()>;
    fn read_enum_value(&mut self, ty: &EnumType) -> Result<u32>;

    /// True when a nullable payload is present.
    fn read_not_null_mark(&mut self) -> Result<bool>;
    /// Consume a null; the counterpart of `write_null_value`.
    fn read_null_value(&mut self) -> Result<()>;

    fn read_primitive_element(
        &mut self,
        _desc: &dyn ElementDescriptor,
        _index: usize,
        tag: PrimitiveTag,
    ) -> Result<Primitive> {
        self.read_primitive_value(tag)
    }

    fn read_unit_element(&mut self, _desc: &dyn ElementDescriptor, _index: usize) -> Result<()> {
        self.read_unit_value()
    }
}

/// Element + delegated-codec write, composed as one unit.
///
/// A nullable-wrapped codec is passed here as the composed wrapper; the
/// wrapper, not the inner codec, is the one invoked.
pub fn write_codec_element(
    out: &mut dyn Encoder,
    desc: &dyn ElementDescriptor,
    index: usize,
    codec: &dyn Codec,
    value: &Value,
) -> Result<()> {
    out.write_element(desc, index)?;
    codec.encode(out, value)
}

/// Delegated-codec read for an already negotiated element.
pub fn read_codec_element(
    inp: &mut dyn Decoder,
    _desc: &dyn ElementDescriptor,
    _index: usize,
    codec: &dyn Codec,
) -> Result<Value> {
    codec.decode(inp)
}
