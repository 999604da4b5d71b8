// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Generated struct types.
//!
//! A `StructSchema` stands in for a dynamically created class: a name plus an
//! ordered list of typed fields. `create_instance` fills every field with a
//! value derived from its position, so two instances of the same schema are
//! always structurally equal.

use serde::{Deserialize, Serialize};

/// Name given to schemas created with an empty name.
const DEFAULT_STRUCT_NAME: &str = "DefaultStruct";

/// Field types cycled through by `StructSchema::create`.
const FIELD_KINDS: [FieldKind; 9] = [
    FieldKind::Bool,
    FieldKind::I8,
    FieldKind::I16,
    FieldKind::I32,
    FieldKind::I64,
    FieldKind::F32,
    FieldKind::F64,
    FieldKind::Str,
    FieldKind::List,
];

/// Declared type of a generated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Str,
    List,
}

/// One declared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
}

/// A generated struct type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructSchema {
    name: String,
    fields: Vec<FieldDef>,
}

impl StructSchema {
    /// Create a struct type with `field_count` fields named `f0..fN`.
    pub fn create(name: &str, field_count: usize) -> Self {
        let name = if name.is_empty() {
            DEFAULT_STRUCT_NAME.to_string()
        } else {
            name.to_string()
        };
        let fields = (0..field_count)
            .map(|index| FieldDef {
                name: format!("f{index}"),
                kind: FIELD_KINDS[index % FIELD_KINDS.len()],
            })
            .collect();
        Self { name, fields }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Build an instance with deterministic field values.
    pub fn create_instance(&self) -> StructValue {
        let fields = self
            .fields
            .iter()
            .enumerate()
            .map(|(index, def)| (def.name.clone(), FieldValue::generate(def.kind, index)))
            .collect();
        StructValue {
            class_name: self.name.clone(),
            fields,
        }
    }
}

/// A concrete field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Str(String),
    List(Vec<i64>),
}

impl FieldValue {
    /// Value for field `index`. Floats stay exactly representable in text formats.
    fn generate(kind: FieldKind, index: usize) -> Self {
        let seed = index as i64;
        match kind {
            FieldKind::Bool => FieldValue::Bool(index % 2 == 0),
            FieldKind::I8 => FieldValue::I8((seed % 128) as i8),
            FieldKind::I16 => FieldValue::I16((seed * 31 % i16::MAX as i64) as i16),
            FieldKind::I32 => FieldValue::I32((seed * 1_000_003 % i32::MAX as i64) as i32),
            FieldKind::I64 => FieldValue::I64(seed * 1_000_000_007),
            FieldKind::F32 => FieldValue::F32(seed as f32 * 0.5),
            FieldKind::F64 => FieldValue::F64(seed as f64 * 0.25),
            FieldKind::Str => FieldValue::Str(format!("str{index}")),
            FieldKind::List => FieldValue::List((0..(seed % 8)).collect()),
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Bool(_) => FieldKind::Bool,
            FieldValue::I8(_) => FieldKind::I8,
            FieldValue::I16(_) => FieldKind::I16,
            FieldValue::I32(_) => FieldKind::I32,
            FieldValue::I64(_) => FieldKind::I64,
            FieldValue::F32(_) => FieldKind::F32,
            FieldValue::F64(_) => FieldKind::F64,
            FieldValue::Str(_) => FieldKind::Str,
            FieldValue::List(_) => FieldKind::List,
        }
    }
}

/// Instance of a generated struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructValue {
    pub class_name: String,
    pub fields: Vec<(String, FieldValue)>,
}

impl StructValue {
    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }
}
