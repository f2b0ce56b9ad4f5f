// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Declared-type model supplied by a front end.
//!
//! A front end extracts, per record type, an ordered field list with
//! structural type references. The order is semantically significant: it
//! fixes element ordinals for both plans and must be stable across repeated
//! extraction of the same type.

use crate::value::PrimitiveTag;
use std::sync::Arc;

/// Base identity of a declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BaseType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Char,
    Str,
    Unit,
    List,
    /// User-declared type, identified by qualified name.
    Named(String),
}

impl BaseType {
    /// Primitive tag for true primitive and text shapes, `None` otherwise.
    pub fn primitive_tag(&self) -> Option<PrimitiveTag> {
        match self {
            Self::Bool => Some(PrimitiveTag::Bool),
            Self::I8 => Some(PrimitiveTag::I8),
            Self::I16 => Some(PrimitiveTag::I16),
            Self::I32 => Some(PrimitiveTag::I32),
            Self::I64 => Some(PrimitiveTag::I64),
            Self::F32 => Some(PrimitiveTag::F32),
            Self::F64 => Some(PrimitiveTag::F64),
            Self::Char => Some(PrimitiveTag::Char),
            Self::Str => Some(PrimitiveTag::Str),
            _ => None,
        }
    }
}

/// Runtime handle for an enum type: its name and declared variants.
///
/// The enum fallback codec is parametrized by this handle directly, not by
/// child codecs like other parametrized codecs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    name: String,
    variants: Vec<String>,
}

impl EnumType {
    pub fn new<I, S>(name: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    pub fn variant_name(&self, ordinal: u32) -> Option<&str> {
        self.variants.get(ordinal as usize).map(String::as_str)
    }

    pub fn variant_ordinal(&self, name: &str) -> Option<u32> {
        self.variants.iter().position(|v| v == name).map(|i| i as u32)
    }
}

/// Structural reference to a declared type: base identity, nullability,
/// ordered type arguments and (for enums) the runtime enum handle.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRef {
    pub base: BaseType,
    pub nullable: bool,
    pub args: Vec<TypeRef>,
    pub enum_shape: Option<Arc<EnumType>>,
}

impl TypeRef {
    pub fn new(base: BaseType) -> Self {
        Self {
            base,
            nullable: false,
            args: Vec::new(),
            enum_shape: None,
        }
    }

    pub fn bool() -> Self {
        Self::new(BaseType::Bool)
    }

    pub fn i32() -> Self {
        Self::new(BaseType::I32)
    }

    pub fn i64() -> Self {
        Self::new(BaseType::I64)
    }

    pub fn f64() -> Self {
        Self::new(BaseType::F64)
    }

    pub fn string() -> Self {
        Self::new(BaseType::Str)
    }

    pub fn unit() -> Self {
        Self::new(BaseType::Unit)
    }

    /// A list with the given element type argument.
    pub fn list_of(element: TypeRef) -> Self {
        Self {
            base: BaseType::List,
            nullable: false,
            args: vec![element],
            enum_shape: None,
        }
    }

    /// A user-declared (non-enum) type.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(BaseType::Named(name.into()))
    }

    /// An enum type carrying its runtime handle.
    pub fn enumeration(shape: Arc<EnumType>) -> Self {
        Self {
            base: BaseType::Named(shape.name().to_string()),
            nullable: false,
            args: Vec::new(),
            enum_shape: Some(shape),
        }
    }

    /// Mark as nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn is_enum(&self) -> bool {
        self.enum_shape.is_some()
    }

    /// The same type with the nullability flag cleared.
    pub fn non_null(&self) -> Self {
        let mut ty = self.clone();
        ty.nullable = false;
        ty
    }

    /// Qualified name of the base identity, for registry lookups.
    pub fn base_name(&self) -> &str {
        match &self.base {
            BaseType::Bool => "Bool",
            BaseType::I8 => "I8",
            BaseType::I16 => "I16",
            BaseType::I32 => "I32",
            BaseType::I64 => "I64",
            BaseType::F32 => "F32",
            BaseType::F64 => "F64",
            BaseType::Char => "Char",
            BaseType::Str => "String",
            BaseType::Unit => "Unit",
            BaseType::List => "List",
            BaseType::Named(name) => name,
        }
    }
}

/// Reference to a registered codec, used for explicit overrides.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodecRef(pub String);

impl CodecRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// One serializable member of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub declared_type: TypeRef,
    /// Stable position, identical in encode and decode.
    pub ordinal: usize,
    pub codec_override: Option<CodecRef>,
}

/// Shape of a generated encode/decode entry point, as declared by the
/// record. The generation driver checks these arities before emitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryPoint {
    /// Number of parameters the entry point takes.
    pub params: usize,
    /// Whether it returns an instance of the record type.
    pub returns_instance: bool,
}

impl EntryPoint {
    /// The well-formed encode entry: (protocol handle, instance) -> ().
    pub fn encode() -> Self {
        Self {
            params: 2,
            returns_instance: false,
        }
    }

    /// The well-formed decode entry: (protocol handle) -> instance.
    pub fn decode() -> Self {
        Self {
            params: 1,
            returns_instance: true,
        }
    }
}

/// A declared record type: the front end's extraction product.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordType {
    qualified_name: String,
    fields: Vec<Field>,
    encode_entry: Option<EntryPoint>,
    decode_entry: Option<EntryPoint>,
}

impl RecordType {
    /// Start a record with well-formed entry points and no fields.
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            fields: Vec::new(),
            encode_entry: Some(EntryPoint::encode()),
            decode_entry: Some(EntryPoint::decode()),
        }
    }

    /// Append a field; the ordinal is its declaration position.
    pub fn field(mut self, name: impl Into<String>, declared_type: TypeRef) -> Self {
        let ordinal = self.fields.len();
        self.fields.push(Field {
            name: name.into(),
            declared_type,
            ordinal,
            codec_override: None,
        });
        self
    }

    /// Append a field with an explicit codec override.
    pub fn field_with_codec(
        mut self,
        name: impl Into<String>,
        declared_type: TypeRef,
        codec: CodecRef,
    ) -> Self {
        let ordinal = self.fields.len();
        self.fields.push(Field {
            name: name.into(),
            declared_type,
            ordinal,
            codec_override: Some(codec),
        });
        self
    }

    /// Replace the declared encode entry shape (`None` removes it).
    pub fn encode_entry(mut self, entry: Option<EntryPoint>) -> Self {
        self.encode_entry = entry;
        self
    }

    /// Replace the declared decode entry shape (`None` removes it).
    pub fn decode_entry(mut self, entry: Option<EntryPoint>) -> Self {
        self.decode_entry = entry;
        self
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn declared_encode_entry(&self) -> Option<EntryPoint> {
        self.encode_entry
    }

    pub fn declared_decode_entry(&self) -> Option<EntryPoint> {
        self.decode_entry
    }
}
