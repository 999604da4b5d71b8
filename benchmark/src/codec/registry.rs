// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Type pre-registration.
//!
//! A registered type is written as a small numeric id instead of its name.
//! Registration happens during adapter setup, never inside a timed loop.

use std::collections::HashMap;

/// First id handed out; lower ids are left for built-in types.
const FIRST_USER_TYPE_ID: u16 = 64;

/// Bidirectional name <-> id table, one per adapter.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    ids: HashMap<String, u16>,
    names: Vec<String>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name`, returning its id. Registering twice returns the same id.
    pub fn register(&mut self, name: &str) -> u16 {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }
        let id = FIRST_USER_TYPE_ID + self.names.len() as u16;
        self.ids.insert(name.to_string(), id);
        self.names.push(name.to_string());
        id
    }

    pub fn id_of(&self, name: &str) -> Option<u16> {
        self.ids.get(name).copied()
    }

    pub fn name_of(&self, id: u16) -> Option<&str> {
        let index = id.checked_sub(FIRST_USER_TYPE_ID)? as usize;
        self.names.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
