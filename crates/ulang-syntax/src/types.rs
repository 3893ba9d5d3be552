//! Registry of recognized type keywords.
//!
//! The parser decides between a declaration and an expression statement by
//! asking this registry whether the leading identifier names a type. New
//! spellings can be registered without touching parser code.

use std::collections::HashMap;

/// Builtin spellings and their canonical names.
const BUILTIN_TYPES: &[(&str, &str)] = &[
    ("int", "int"),
    ("double", "double"),
    ("char", "char"),
    ("const", "const"),
];

/// Mapping from type-keyword spelling to canonical type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    names: HashMap<String, String>,
}

impl TypeRegistry {
    /// An empty registry that recognizes no type keywords.
    pub fn empty() -> Self {
        Self {
            names: HashMap::new(),
        }
    }

    /// The builtin set: `int`, `double`, `char` and the `const` modifier.
    pub fn builtin() -> Self {
        let mut reg = Self::empty();
        for (spelling, canonical) in BUILTIN_TYPES {
            reg.register(*spelling, *canonical);
        }
        reg
    }

    /// Registers `spelling` as a type keyword. Re-registering replaces the
    /// canonical name.
    pub fn register(&mut self, spelling: impl Into<String>, canonical: impl Into<String>) {
        self.names.insert(spelling.into(), canonical.into());
    }

    pub fn contains(&self, spelling: &str) -> bool {
        self.names.contains_key(spelling)
    }

    /// Canonical name for `spelling`, if it is a registered type keyword.
    pub fn canonical(&self, spelling: &str) -> Option<&str> {
        self.names.get(spelling).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
