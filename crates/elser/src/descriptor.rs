// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Element descriptors: immutable structural metadata shared by encode and
//! decode.
//!
//! A descriptor names a structured type, states its structural kind, and
//! maps between element names and their dense, zero-based indices. The index
//! assignment follows field declaration order and never changes after
//! construction, so one descriptor instance is safely shared across any
//! number of encode/decode invocations.

use crate::error::DescriptorError;
use crate::value::Value;
use std::collections::HashMap;

/// Structural kind of a described type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuralKind {
    /// Record with named, indexed fields.
    Record,
    /// Variable-length sequence (size at the reserved index, items after).
    List,
    /// The unit value, carrying no elements.
    Unit,
    /// Enumeration constant.
    Enum,
}

/// One named, indexed element of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementInfo {
    pub name: String,
    pub index: usize,
}

/// Structural metadata for one type.
///
/// `element_name` and `element_index` are mutual inverses over the valid
/// range and both fail with a [`DescriptorError`] outside it.
pub trait ElementDescriptor: std::fmt::Debug + Send + Sync {
    /// Fully qualified type name.
    fn qualified_name(&self) -> &str;

    /// Structural kind.
    fn structural_kind(&self) -> StructuralKind;

    /// Number of elements an *instance* contributes. Static for records,
    /// instance-dependent for composites like lists.
    fn element_count(&self, value: Option<&Value>) -> usize;

    /// Name of the element at `index`.
    fn element_name(&self, index: usize) -> Result<String, DescriptorError>;

    /// Index of the element named `name`.
    fn element_index(&self, name: &str) -> Result<usize, DescriptorError>;
}

/// Descriptor for a record type, built once from the declared field list.
#[derive(Debug)]
pub struct RecordDescriptor {
    qualified_name: String,
    elements: Vec<ElementInfo>,
    index_by_name: HashMap<String, usize>,
}

impl RecordDescriptor {
    /// Build from element names in declaration order.
    pub fn new<I, S>(qualified_name: impl Into<String>, element_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut elements = Vec::new();
        let mut index_by_name = HashMap::new();
        for (index, name) in element_names.into_iter().enumerate() {
            let name = name.into();
            index_by_name.insert(name.clone(), index);
            elements.push(ElementInfo { name, index });
        }
        Self {
            qualified_name: qualified_name.into(),
            elements,
            index_by_name,
        }
    }

    /// Elements in declaration order.
    pub fn elements(&self) -> &[ElementInfo] {
        &self.elements
    }
}

impl ElementDescriptor for RecordDescriptor {
    fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    fn structural_kind(&self) -> StructuralKind {
        StructuralKind::Record
    }

    fn element_count(&self, _value: Option<&Value>) -> usize {
        self.elements.len()
    }

    fn element_name(&self, index: usize) -> Result<String, DescriptorError> {
        self.elements
            .get(index)
            .map(|e| e.name.clone())
            .ok_or_else(|| DescriptorError::UnknownIndex {
                descriptor: self.qualified_name.clone(),
                index,
            })
    }

    fn element_index(&self, name: &str) -> Result<usize, DescriptorError> {
        self.index_by_name
            .get(name)
            .copied()
            .ok_or_else(|| DescriptorError::UnknownName {
                descriptor: self.qualified_name.clone(),
                name: name.to_string(),
            })
    }
}

/// Descriptor for the unit value. Carries no elements; any element lookup
/// is a descriptor error.
#[derive(Debug)]
pub struct UnitDescriptor;

/// The shared unit descriptor instance.
pub static UNIT_DESCRIPTOR: UnitDescriptor = UnitDescriptor;

impl ElementDescriptor for UnitDescriptor {
    fn qualified_name(&self) -> &str {
        "Unit"
    }

    fn structural_kind(&self) -> StructuralKind {
        StructuralKind::Unit
    }

    fn element_count(&self, _value: Option<&Value>) -> usize {
        0
    }

    fn element_name(&self, _index: usize) -> Result<String, DescriptorError> {
        Err(DescriptorError::NoElements {
            descriptor: "Unit".into(),
        })
    }

    fn element_index(&self, _name: &str) -> Result<usize, DescriptorError> {
        Err(DescriptorError::NoElements {
            descriptor: "Unit".into(),
        })
    }
}
