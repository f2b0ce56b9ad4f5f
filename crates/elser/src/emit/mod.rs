// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Emission seam: backends lower derived plans into an executable form.
//!
//! A backend implements the capability set `{emit_descriptor, emit_encode,
//! emit_decode}`; [`generate`] is the driver that derives plans for a
//! record and hands them over, one call per eligible entry point. The
//! bundled [`interp`] backend lowers plans into interpreted execution over
//! dynamic [`crate::value::Value`]s; other targets (machine code, managed
//! bytecode) plug in behind the same trait.

pub mod interp;

pub use interp::{derive_record_codec, InterpBackend, RecordCodec};

use crate::descriptor::RecordDescriptor;
use crate::error::Result;
use crate::model::{EntryPoint, RecordType};
use crate::plan::{DecodePlan, EncodePlan, PlanBuilder};
use crate::resolve::CodecRegistry;
use std::sync::Arc;

/// Lowering target for derived plans.
pub trait PlanEmitter {
    /// Bind the descriptor; called once when any plan was emitted.
    fn emit_descriptor(&mut self, descriptor: &Arc<RecordDescriptor>) -> Result<()>;
    fn emit_encode(&mut self, plan: &EncodePlan) -> Result<()>;
    fn emit_decode(&mut self, plan: &DecodePlan) -> Result<()>;
}

/// Entry-point eligibility: the encode entry takes exactly two parameters
/// (protocol handle, instance); the decode entry takes one and returns an
/// instance. A mismatch disables generation for that entry point only.
fn encode_entry_eligible(entry: Option<EntryPoint>) -> bool {
    matches!(
        entry,
        Some(EntryPoint {
            params: 2,
            returns_instance: false
        })
    )
}

fn decode_entry_eligible(entry: Option<EntryPoint>) -> bool {
    matches!(
        entry,
        Some(EntryPoint {
            params: 1,
            returns_instance: true
        })
    )
}

/// Derive plans for `record` and emit every eligible entry point through
/// `emitter`. Returns whether anything was emitted.
///
/// Shape mismatches are logged and skipped, never fatal; resolution
/// failures inside plan derivation surface as generation errors naming the
/// offending field.
pub fn generate(
    registry: &CodecRegistry,
    record: &RecordType,
    emitter: &mut dyn PlanEmitter,
) -> Result<bool> {
    let encode_ok = encode_entry_eligible(record.declared_encode_entry());
    let decode_ok = decode_entry_eligible(record.declared_decode_entry());
    if !encode_ok {
        log::warn!(
            "{}: encode entry point shape mismatch, skipping encode generation",
            record.qualified_name()
        );
    }
    if !decode_ok {
        log::warn!(
            "{}: decode entry point shape mismatch, skipping decode generation",
            record.qualified_name()
        );
    }
    if !encode_ok && !decode_ok {
        return Ok(false);
    }

    let plans = PlanBuilder::new(registry).derive(record)?;
    if encode_ok {
        emitter.emit_encode(&plans.encode)?;
    }
    if decode_ok {
        emitter.emit_decode(&plans.decode)?;
    }
    emitter.emit_descriptor(&plans.descriptor)?;
    Ok(true)
}
