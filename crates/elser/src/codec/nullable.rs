// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Nullable decorator: wraps a codec for `T` into a codec for nullable `T`.

use crate::codec::Codec;
use crate::error::Result;
use crate::protocol::{Decoder, Encoder};
use crate::value::Value;
use std::sync::Arc;

/// Decorator composing with any inner codec, including parametrized ones.
///
/// A present value is announced with the not-null mark before delegating;
/// a null is a bare null marker with no payload.
#[derive(Debug, Clone)]
pub struct NullableCodec {
    inner: Arc<dyn Codec>,
}

impl NullableCodec {
    pub fn new(inner: Arc<dyn Codec>) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &Arc<dyn Codec> {
        &self.inner
    }
}

impl Codec for NullableCodec {
    fn encode(&self, out: &mut dyn Encoder, value: &Value) -> Result<()> {
        if value.is_null() {
            out.write_null_value()
        } else {
            out.write_not_null_mark()?;
            self.inner.encode(out, value)
        }
    }

    fn decode(&self, inp: &mut dyn Decoder) -> Result<Value> {
        if inp.read_not_null_mark()? {
            self.inner.decode(inp)
        } else {
            inp.read_null_value()?;
            Ok(Value::Null)
        }
    }
}

/// Wrap `inner` in the nullable decorator.
pub fn make_nullable(inner: Arc<dyn Codec>) -> Arc<dyn Codec> {
    Arc::new(NullableCodec::new(inner))
}
