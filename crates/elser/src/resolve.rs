// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Recursive serializer resolution.
//!
//! `Resolver::bind` answers, for a declared type and an optional explicit
//! override, which codec handles it and how that codec must be
//! instantiated. Precedence, highest first: the field's own override, an
//! override registered for the type itself, a builtin match for the exact
//! primitive/text/unit shape, the enum fallback, then `None`.
//!
//! Resolution never throws. It runs as two pure passes over one recursive
//! traversal: `bind` is a dry run producing a [`CodecBinding`] tree without
//! instantiating anything (every type argument must independently bind, or
//! the whole binding is `None`), and `materialize` consumes a proven tree
//! to build codec instances. Construction therefore never observes a
//! half-resolved argument list.

use crate::codec::builtin::enum_codec;
use crate::codec::list::ListCodec;
use crate::codec::nullable::make_nullable;
use crate::codec::{Codec, PrimitiveCodec, UnitCodec};
use crate::model::{BaseType, CodecRef, EnumType, TypeRef};
use crate::value::PrimitiveTag;
use std::collections::HashMap;
use std::sync::Arc;

/// Bound on resolution recursion depth. Nesting of declared generics is
/// normally shallow; a self-referential generic type would otherwise
/// recurse without limit.
pub const MAX_RESOLVE_DEPTH: usize = 64;

/// Registry name of the enum fallback factory.
const ENUM_FALLBACK: &str = "Enum";

/// How a registered codec is obtained.
pub enum CodecFactory {
    /// An existing shared instance.
    Singleton(Arc<dyn Codec>),
    /// Constructed from the codecs of its type arguments.
    Parametrized {
        arity: usize,
        build: fn(&[Arc<dyn Codec>]) -> Arc<dyn Codec>,
    },
    /// Constructed from the enum type handle itself, not from child codecs.
    EnumFallback,
}

impl std::fmt::Debug for CodecFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Singleton(c) => f.debug_tuple("Singleton").field(c).finish(),
            Self::Parametrized { arity, .. } => {
                f.debug_struct("Parametrized").field("arity", arity).finish()
            }
            Self::EnumFallback => f.write_str("EnumFallback"),
        }
    }
}

/// Named codec factories plus per-type overrides.
#[derive(Debug, Default)]
pub struct CodecRegistry {
    factories: HashMap<String, CodecFactory>,
    type_overrides: HashMap<String, CodecRef>,
}

impl CodecRegistry {
    /// Empty registry, without even the builtins.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            type_overrides: HashMap::new(),
        }
    }

    /// Registry pre-loaded with the builtin codec library.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, tag) in [
            ("Bool", PrimitiveTag::Bool),
            ("I8", PrimitiveTag::I8),
            ("I16", PrimitiveTag::I16),
            ("I32", PrimitiveTag::I32),
            ("I64", PrimitiveTag::I64),
            ("F32", PrimitiveTag::F32),
            ("F64", PrimitiveTag::F64),
            ("Char", PrimitiveTag::Char),
            ("String", PrimitiveTag::Str),
        ] {
            registry.register_singleton(name, Arc::new(PrimitiveCodec::new(tag)));
        }
        registry.register_singleton("Unit", Arc::new(UnitCodec));
        registry.register(
            "List",
            CodecFactory::Parametrized {
                arity: 1,
                build: |args| Arc::new(ListCodec::new(args[0].clone())),
            },
        );
        registry.register(ENUM_FALLBACK, CodecFactory::EnumFallback);
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, factory: CodecFactory) {
        self.factories.insert(name.into(), factory);
    }

    pub fn register_singleton(&mut self, name: impl Into<String>, codec: Arc<dyn Codec>) {
        self.register(name, CodecFactory::Singleton(codec));
    }

    /// Register `codec` as the override declared on the type itself.
    pub fn register_type_codec(&mut self, type_name: impl Into<String>, codec: Arc<dyn Codec>) {
        let type_name = type_name.into();
        self.register_singleton(type_name.clone(), codec);
        self.type_overrides
            .insert(type_name.clone(), CodecRef::new(type_name));
    }

    pub fn factory(&self, name: &str) -> Option<&CodecFactory> {
        self.factories.get(name)
    }

    pub fn type_override(&self, type_name: &str) -> Option<&CodecRef> {
        self.type_overrides.get(type_name)
    }

    fn builtin_for(&self, base: &BaseType) -> Option<&'static str> {
        match base {
            BaseType::Bool => Some("Bool"),
            BaseType::I8 => Some("I8"),
            BaseType::I16 => Some("I16"),
            BaseType::I32 => Some("I32"),
            BaseType::I64 => Some("I64"),
            BaseType::F32 => Some("F32"),
            BaseType::F64 => Some("F64"),
            BaseType::Char => Some("Char"),
            BaseType::Str => Some("String"),
            BaseType::Unit => Some("Unit"),
            BaseType::List => Some("List"),
            BaseType::Named(_) => None,
        }
    }
}

/// The resolved answer for one type: what codec handles it and how to
/// instantiate it. Produced by the dry-run pass, consumed by
/// materialization; absence (`None` from [`Resolver::bind`]) is the
/// unresolvable case.
pub enum CodecBinding {
    /// A shared instance; nothing to construct.
    Singleton(Arc<dyn Codec>),
    /// Constructed from its recursively bound argument codecs.
    Parametrized {
        build: fn(&[Arc<dyn Codec>]) -> Arc<dyn Codec>,
        args: Vec<CodecBinding>,
    },
    /// The enum fallback, constructed from the type handle.
    Enum(Arc<EnumType>),
    /// The non-null binding, to be wrapped in the nullable decorator.
    Nullable(Box<CodecBinding>),
}

impl std::fmt::Debug for CodecBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Singleton(c) => f.debug_tuple("Singleton").field(c).finish(),
            Self::Parametrized { args, .. } => {
                f.debug_struct("Parametrized").field("args", args).finish()
            }
            Self::Enum(ty) => f.debug_tuple("Enum").field(&ty.name()).finish(),
            Self::Nullable(inner) => f.debug_tuple("Nullable").field(inner).finish(),
        }
    }
}

/// Serializer resolver over one registry.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    registry: &'a CodecRegistry,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a CodecRegistry) -> Self {
        Self { registry }
    }

    /// Resolve and instantiate in one call.
    pub fn resolve(
        &self,
        ty: &TypeRef,
        explicit_override: Option<&CodecRef>,
    ) -> Option<Arc<dyn Codec>> {
        let binding = self.bind(ty, explicit_override, 0)?;
        Some(Self::materialize(&binding))
    }

    /// Dry-run pass: decide how `ty` would be encoded without constructing
    /// anything. `None` propagates silently up the recursion.
    pub fn bind(
        &self,
        ty: &TypeRef,
        explicit_override: Option<&CodecRef>,
        depth: usize,
    ) -> Option<CodecBinding> {
        if depth > MAX_RESOLVE_DEPTH {
            log::debug!(
                "codec resolution for '{}' exceeded depth {}",
                ty.base_name(),
                MAX_RESOLVE_DEPTH
            );
            return None;
        }
        if ty.nullable {
            let inner = self.bind(&ty.non_null(), explicit_override, depth)?;
            return Some(CodecBinding::Nullable(Box::new(inner)));
        }

        let codec_ref = explicit_override
            .cloned()
            .or_else(|| self.registry.type_override(ty.base_name()).cloned())
            .or_else(|| self.registry.builtin_for(&ty.base).map(CodecRef::new))
            .or_else(|| {
                if ty.is_enum() {
                    Some(CodecRef::new(ENUM_FALLBACK))
                } else {
                    None
                }
            })?;

        match self.registry.factory(codec_ref.name())? {
            CodecFactory::Singleton(codec) => Some(CodecBinding::Singleton(codec.clone())),
            CodecFactory::Parametrized { arity, build } => {
                if ty.args.len() != *arity {
                    log::debug!(
                        "codec '{}' expects {} type arguments, '{}' declares {}",
                        codec_ref.name(),
                        arity,
                        ty.base_name(),
                        ty.args.len()
                    );
                    return None;
                }
                let args = ty
                    .args
                    .iter()
                    .map(|arg| self.bind(arg, None, depth + 1))
                    .collect::<Option<Vec<_>>>()?;
                Some(CodecBinding::Parametrized {
                    build: *build,
                    args,
                })
            }
            CodecFactory::EnumFallback => ty.enum_shape.clone().map(CodecBinding::Enum),
        }
    }

    /// Materializing pass: instantiate codecs from a proven binding tree.
    /// Infallible by construction, since `bind` already checked every path.
    pub fn materialize(binding: &CodecBinding) -> Arc<dyn Codec> {
        match binding {
            CodecBinding::Singleton(codec) => codec.clone(),
            CodecBinding::Parametrized { build, args } => {
                let arg_codecs: Vec<Arc<dyn Codec>> = args.iter().map(Self::materialize).collect();
                build(&arg_codecs)
            }
            CodecBinding::Enum(ty) => enum_codec(ty.clone()),
            CodecBinding::Nullable(inner) => make_nullable(Self::materialize(inner)),
        }
    }
}
