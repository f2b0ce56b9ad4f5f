// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Sequence composite codec.
//!
//! Lists are positional where records are not: items must be read with
//! strictly increasing, contiguous indices starting at 1. The size lives at
//! the reserved index and is the only element allowed out of that sequence
//! (it may arrive lazily). Any other index that is not "one more than the
//! items read so far" is an unrecoverable decode error.

use crate::codec::Codec;
use crate::descriptor::{ElementDescriptor, StructuralKind};
use crate::error::{DescriptorError, Result, StreamError};
use crate::protocol::{read_codec_element, write_codec_element, Decoder, ElementToken, Encoder};
use crate::value::{Primitive, PrimitiveTag, Value};
use std::sync::Arc;

/// Reserved element index carrying the list size.
pub const SIZE_INDEX: usize = 0;

/// Descriptor for the list composite: "size" at the reserved index, items
/// named by their 1-based position.
#[derive(Debug)]
pub struct ListDescriptor;

/// The shared list descriptor instance.
pub static LIST_DESCRIPTOR: ListDescriptor = ListDescriptor;

impl ElementDescriptor for ListDescriptor {
    fn qualified_name(&self) -> &str {
        "List"
    }

    fn structural_kind(&self) -> StructuralKind {
        StructuralKind::List
    }

    fn element_count(&self, value: Option<&Value>) -> usize {
        value.and_then(Value::as_list).map_or(0, <[Value]>::len)
    }

    fn element_name(&self, index: usize) -> Result<String, DescriptorError> {
        if index == SIZE_INDEX {
            Ok("size".to_string())
        } else {
            Ok(index.to_string())
        }
    }

    fn element_index(&self, name: &str) -> Result<usize, DescriptorError> {
        if name == "size" {
            return Ok(SIZE_INDEX);
        }
        name.parse::<usize>()
            .map_err(|_| DescriptorError::UnknownName {
                descriptor: "List".into(),
                name: name.to_string(),
            })
    }
}

/// Codec for a list with a fixed element codec.
#[derive(Debug, Clone)]
pub struct ListCodec {
    element: Arc<dyn Codec>,
}

impl ListCodec {
    pub fn new(element: Arc<dyn Codec>) -> Self {
        Self { element }
    }

    pub fn element_codec(&self) -> &Arc<dyn Codec> {
        &self.element
    }

    fn read_size(&self, inp: &mut dyn Decoder, items: &mut Vec<Value>) -> Result<usize> {
        let size = match inp.read_primitive_element(&LIST_DESCRIPTOR, SIZE_INDEX, PrimitiveTag::I32)?
        {
            Primitive::I32(n) if n >= 0 => n as usize,
            Primitive::I32(n) => {
                return Err(StreamError::Malformed {
                    reason: format!("negative list size {}", n),
                }
                .into())
            }
            other => return Err(Value::Primitive(other).mismatch("i32 list size")),
        };
        items.reserve(size.min(4096));
        Ok(size)
    }

    fn read_item(&self, inp: &mut dyn Decoder, items: &mut Vec<Value>, index: usize) -> Result<()> {
        items.push(read_codec_element(
            inp,
            &LIST_DESCRIPTOR,
            index,
            self.element.as_ref(),
        )?);
        Ok(())
    }
}

impl Codec for ListCodec {
    fn encode(&self, out: &mut dyn Encoder, value: &Value) -> Result<()> {
        let items = value.as_list().ok_or_else(|| value.mismatch("list"))?;
        out.write_begin(&LIST_DESCRIPTOR)?;
        out.write_primitive_element(
            &LIST_DESCRIPTOR,
            SIZE_INDEX,
            &Primitive::I32(items.len() as i32),
        )?;
        for (position, item) in items.iter().enumerate() {
            write_codec_element(
                out,
                &LIST_DESCRIPTOR,
                position + 1,
                self.element.as_ref(),
                item,
            )?;
        }
        out.write_end(&LIST_DESCRIPTOR)
    }

    fn decode(&self, inp: &mut dyn Decoder) -> Result<Value> {
        inp.read_begin(&LIST_DESCRIPTOR)?;
        let mut items = Vec::new();
        loop {
            match inp.read_element(&LIST_DESCRIPTOR)? {
                ElementToken::All => {
                    // Fast path: size, then exactly that many items in order.
                    let size = self.read_size(inp, &mut items)?;
                    for index in 1..=size {
                        self.read_item(inp, &mut items, index)?;
                    }
                    break;
                }
                ElementToken::Done => break,
                ElementToken::Index(SIZE_INDEX) => {
                    self.read_size(inp, &mut items)?;
                }
                ElementToken::Index(index) => {
                    if items.len() == index - 1 {
                        self.read_item(inp, &mut items, index)?;
                    } else {
                        return Err(StreamError::ListOutOfOrder {
                            expected: items.len() + 1,
                            found: index,
                        }
                        .into());
                    }
                }
            }
        }
        inp.read_end(&LIST_DESCRIPTOR)?;
        Ok(Value::List(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_reserved_size_element() {
        assert_eq!(LIST_DESCRIPTOR.element_name(SIZE_INDEX).unwrap(), "size");
        assert_eq!(LIST_DESCRIPTOR.element_index("size").unwrap(), SIZE_INDEX);
        assert_eq!(LIST_DESCRIPTOR.element_name(3).unwrap(), "3");
        assert_eq!(LIST_DESCRIPTOR.element_index("17").unwrap(), 17);
        assert!(matches!(
            LIST_DESCRIPTOR.element_index("items"),
            Err(DescriptorError::UnknownName { .. })
        ));
    }

    #[test]
    fn test_descriptor_count_is_instance_dependent() {
        let value = Value::from(vec![1i32, 2, 3]);
        assert_eq!(LIST_DESCRIPTOR.element_count(Some(&value)), 3);
        assert_eq!(LIST_DESCRIPTOR.element_count(None), 0);
    }
}
