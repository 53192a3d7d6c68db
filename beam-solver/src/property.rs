//! Property codes: associations between input set codes and patch data
//!
//! Topology sets name groups of patches. Each patch of a set gets a
//! [`Property`] carrying the set's code; once the code is given a meaning
//! (material, body load, ...) the property is typed and may be re-indexed
//! to point at the data it refers to.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What a property code refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyKind {
    Undefined,
    Material,
    BodyLoad,
}

/// A typed property attached to one patch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub kind: PropertyKind,
    /// Property code, or data index once re-indexed
    pub index: i32,
    /// 1-based patch number
    pub patch: usize,
}

/// Property list plus the named topology sets it is built from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyTable {
    properties: Vec<Property>,
    sets: BTreeMap<String, Vec<usize>>,
}

impl PropertyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or extend) a named set of 1-based patches
    pub fn add_set(&mut self, name: &str, patches: &[usize]) {
        self.sets
            .entry(name.to_string())
            .or_default()
            .extend_from_slice(patches);
    }

    /// Attach an untyped property with `code` to a patch
    pub fn add_property(&mut self, code: i32, patch: usize) {
        self.properties.push(Property {
            kind: PropertyKind::Undefined,
            index: code,
            patch,
        });
    }

    /// Give every untyped property with `code` the kind `kind`, and point
    /// it at data `index` when one is given.
    ///
    /// Codes `<= 0` mean "no explicit code" and are ignored. Returns whether
    /// any property was typed.
    pub fn set_property_type(&mut self, code: i32, kind: PropertyKind, index: Option<usize>) -> bool {
        if code <= 0 {
            return false;
        }

        let mut found = false;
        for prop in &mut self.properties {
            if prop.kind == PropertyKind::Undefined && prop.index == code {
                prop.kind = kind;
                if let Some(idx) = index {
                    prop.index = idx as i32;
                }
                found = true;
            }
        }
        found
    }

    /// Allocate a fresh code for the named set and attach it to the set's patches.
    ///
    /// The code is the smallest value `>= comp` (and `>= 1`) not used by any
    /// property. Returns 0 if the name is empty or the set is unknown.
    pub fn unique_property_code(&mut self, set_name: &str, comp: i32) -> i32 {
        if set_name.is_empty() {
            return 0;
        }
        let Some(patches) = self.sets.get(set_name).cloned() else {
            return 0;
        };

        let mut code = comp.max(1);
        while self.properties.iter().any(|p| p.index == code) {
            code += 1;
        }
        for patch in patches {
            self.add_property(code, patch);
        }
        code
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Properties of a given kind on a given patch, in insertion order
    pub fn on_patch(&self, kind: PropertyKind, patch: usize) -> impl Iterator<Item = &Property> {
        self.properties
            .iter()
            .filter(move |p| p.kind == kind && p.patch == patch)
    }
}
