// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-type memoization of derived codecs.
//!
//! Derivation is pure, so the result for a record type is computed at most
//! once and shared. Concurrent first use is safe: the entry's shard stays
//! locked for the duration of derivation, so exactly one thread constructs
//! and everyone else reads the published instance.

use crate::emit::{derive_record_codec, RecordCodec};
use crate::error::Result;
use crate::model::RecordType;
use crate::resolve::CodecRegistry;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// Registry plus construct-once codec store, keyed by qualified name.
#[derive(Debug)]
pub struct CodecCache {
    registry: RwLock<CodecRegistry>,
    codecs: DashMap<String, Arc<RecordCodec>>,
}

impl CodecCache {
    pub fn new(registry: CodecRegistry) -> Self {
        Self {
            registry: RwLock::new(registry),
            codecs: DashMap::new(),
        }
    }

    /// Cache over a registry pre-loaded with the builtin codec library.
    pub fn with_builtins() -> Self {
        Self::new(CodecRegistry::with_builtins())
    }

    /// Run `f` with the registry exclusively borrowed, e.g. to register
    /// custom codecs before first use.
    pub fn configure<R>(&self, f: impl FnOnce(&mut CodecRegistry) -> R) -> R {
        f(&mut self.registry.write())
    }

    /// The memoized codec for `record`, deriving it on first use. `None`
    /// when no entry point of the record was eligible.
    pub fn codec_for(&self, record: &RecordType) -> Result<Option<Arc<RecordCodec>>> {
        match self.codecs.entry(record.qualified_name().to_string()) {
            Entry::Occupied(entry) => Ok(Some(entry.get().clone())),
            Entry::Vacant(entry) => {
                log::debug!("deriving codec for {}", record.qualified_name());
                match derive_record_codec(&self.registry.read(), record)? {
                    Some(codec) => {
                        entry.insert(codec.clone());
                        Ok(Some(codec))
                    }
                    None => Ok(None),
                }
            }
        }
    }

    /// Derive (or fetch) the codec for `record` and register it as the
    /// codec of the record's type, so other records can declare fields of
    /// this type and resolve them.
    pub fn register_record(&self, record: &RecordType) -> Result<Option<Arc<RecordCodec>>> {
        let codec = self.codec_for(record)?;
        if let Some(codec) = &codec {
            self.registry
                .write()
                .register_type_codec(record.qualified_name(), codec.clone());
        }
        Ok(codec)
    }
}

impl Default for CodecCache {
    fn default() -> Self {
        Self::with_builtins()
    }
}
