// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Protocol doubles for unit tests: a counting sink and a scripted source.

use crate::descriptor::ElementDescriptor;
use crate::error::{Error, Result, StreamError};
use crate::model::EnumType;
use crate::protocol::{Decoder, ElementToken, Encoder};
use crate::value::{Primitive, PrimitiveTag};
use std::collections::VecDeque;

/// Encoder that discards payloads and counts what was invoked.
#[derive(Debug, Default)]
pub struct NullEncoder {
    pub primitives_written: usize,
    pub units_written: usize,
    pub enums_written: Vec<u32>,
    pub not_null_marks: usize,
    pub nulls_written: usize,
}

impl Encoder for NullEncoder {
    fn write_begin(&mut self, _desc: &dyn ElementDescriptor) -> Result<()> {
        Ok(())
    }

    fn write_end(&mut self, _desc: &dyn ElementDescriptor) -> Result<()> {
        Ok(())
    }

    fn write_element(&mut self, _desc: &dyn ElementDescriptor, _index: usize) -> Result<()> {
        Ok(())
    }

    fn write_primitive_value(&mut self, _value: &Primitive) -> Result<()> {
        self.primitives_written += 1;
        Ok(())
    }

    fn write_unit_value(&mut self) -> Result<()> {
        self.units_written += 1;
        Ok(())
    }

    fn write_enum_value(&mut self, _ty: &EnumType, ordinal: u32) -> Result<()> {
        self.enums_written.push(ordinal);
        Ok(())
    }

    fn write_not_null_mark(&mut self) -> Result<()> {
        self.not_null_marks += 1;
        Ok(())
    }

    fn write_null_value(&mut self) -> Result<()> {
        self.nulls_written += 1;
        Ok(())
    }
}

/// Decoder that replays pre-scripted answers front to back.
///
/// An exhausted queue surfaces as a malformed-stream error rather than a
/// panic, so tests can also assert on under-supplied scripts. An exhausted
/// `tokens` queue answers [`ElementToken::Done`].
#[derive(Debug, Default)]
pub struct ScriptedDecoder {
    pub tokens: VecDeque<ElementToken>,
    pub primitives: VecDeque<Primitive>,
    pub enums: VecDeque<u32>,
    pub not_null_marks: VecDeque<bool>,
}

impl ScriptedDecoder {
    pub fn primitives(values: Vec<Primitive>) -> Self {
        Self {
            primitives: values.into(),
            ..Self::default()
        }
    }

    pub fn enums(ordinals: Vec<u32>) -> Self {
        Self {
            enums: ordinals.into(),
            ..Self::default()
        }
    }

    fn exhausted(what: &str) -> Error {
        StreamError::Malformed {
            reason: format!("scripted decoder ran out of {what}"),
        }
        .into()
    }
}

impl Decoder for ScriptedDecoder {
    fn read_begin(&mut self, _desc: &dyn ElementDescriptor) -> Result<()> {
        Ok(())
    }

    fn read_end(&mut self, _desc: &dyn ElementDescriptor) -> Result<()> {
        Ok(())
    }

    fn read_element(&mut self, _desc: &dyn ElementDescriptor) -> Result<ElementToken> {
        Ok(self.tokens.pop_front().unwrap_or(ElementToken::Done))
    }

    fn read_primitive_value(&mut self, _tag: PrimitiveTag) -> Result<Primitive> {
        self.primitives
            .pop_front()
            .ok_or_else(|| Self::exhausted("primitives"))
    }

    fn read_unit_value(&mut self) -> Result<()> {
        Ok(())
    }

    fn read_enum_value(&mut self, _ty: &EnumType) -> Result<u32> {
        self.enums.pop_front().ok_or_else(|| Self::exhausted("enums"))
    }

    fn read_not_null_mark(&mut self) -> Result<bool> {
        self.not_null_marks
            .pop_front()
            .ok_or_else(|| Self::exhausted("null marks"))
    }

    fn read_null_value(&mut self) -> Result<()> {
        Ok(())
    }
}
