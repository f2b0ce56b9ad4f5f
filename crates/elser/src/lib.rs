// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # ELSER - Element-Stream Serialization Core
//!
//! A serialization core built around structural streaming: record types are
//! described by element descriptors, encoded and decoded through an abstract
//! protocol of `begin` / `element` / value / `end` operations, and driven by
//! codecs derived ahead of time from a type model.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use elser::{Codec, CodecCache, Encoder, RecordType, Result, TypeRef, Value};
//!
//! fn publish(out: &mut dyn Encoder) -> Result<()> {
//!     // Describe a record type
//!     let data = RecordType::new("demo.Data")
//!         .field("value1", TypeRef::string())
//!         .field("value2", TypeRef::i32());
//!
//!     // Derive its codec once; later lookups hit the cache
//!     let cache = CodecCache::with_builtins();
//!     let codec = cache.codec_for(&data)?.expect("eligible entry points");
//!
//!     // Drive any Encoder implementation with it
//!     let value = Value::Record(vec![Value::from("s1"), Value::from(42i32)]);
//!     codec.encode(out, &value)
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +--------------------------------------------------------------+
//! |                        Derivation                            |
//! |   RecordType --> PlanBuilder --> Encode/Decode plans         |
//! |                      |                                       |
//! |                  Resolver (registry, overrides, builtins)    |
//! +--------------------------------------------------------------+
//! |                        Execution                             |
//! |   RecordCodec interprets plans against the protocol;         |
//! |   builtin / list / nullable / enum codecs compose below it   |
//! +--------------------------------------------------------------+
//! |                        Protocol                              |
//! |   Encoder / Decoder traits; formats plug in underneath       |
//! +--------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`CodecCache`] | Entry point: registry plus memoized per-type derivation |
//! | [`RecordType`] | Declared shape of a record (fields, overrides, entry points) |
//! | [`Codec`] | Paired encode/decode logic for one type |
//! | [`Encoder`] / [`Decoder`] | The structural streaming protocol |
//! | [`ElementDescriptor`] | Runtime introspection over a structure's elements |
//!
//! ## Modules Overview
//!
//! - [`cache`] - Memoized derivation (start here)
//! - [`model`] - The declared type model derivation consumes
//! - [`resolve`] - Recursive codec resolution with override precedence
//! - [`plan`] - Encode/decode plan derivation per record
//! - [`emit`] - Plan backends; [`emit::interp`] interprets plans directly
//! - [`protocol`] - The abstract streaming contract
//! - [`codec`] - Builtin, list, nullable and enum codecs

// Clippy: No blanket suppressions. Fix issues properly or use inline #[allow] with justification.

/// Memoized per-type codec derivation.
pub mod cache;
/// Codecs: builtin primitives, enums, lists, the nullable decorator.
pub mod codec;
/// Element descriptors: runtime structure introspection.
pub mod descriptor;
/// Plan backends and the generation driver.
pub mod emit;
/// Error types for descriptor, stream and generation failures.
pub mod error;
/// Declared type model: base types, type references, records, entry points.
pub mod model;
/// Encode/decode plan derivation.
pub mod plan;
/// The structural streaming protocol (Encoder/Decoder contract).
pub mod protocol;
/// Recursive codec resolution against a registry.
pub mod resolve;
/// Dynamic values flowing through codecs.
pub mod value;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::CodecCache;
pub use codec::Codec;
pub use descriptor::{ElementDescriptor, RecordDescriptor, StructuralKind};
pub use emit::{derive_record_codec, generate, InterpBackend, PlanEmitter, RecordCodec};
pub use error::{DescriptorError, Error, GenerationError, Result, StreamError};
pub use model::{EnumType, RecordType, TypeRef};
pub use plan::{DecodePlan, EncodePlan, PlanBuilder, RecordPlans};
pub use protocol::{Decoder, ElementToken, Encoder};
pub use resolve::{CodecRegistry, Resolver};
pub use value::{Primitive, PrimitiveTag, Value};
