//! Program ("major") entities and free-text entity extraction
//!
//! The registry is built once at startup and never mutated. Extraction is
//! deliberately first-match-wins in registry order: when two programs share
//! a variant substring, the one registered first is returned.

mod catalog;

use serde::Serialize;

/// A degree program recognised in free text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub id: String,
    pub display_name: String,
    pub school_id: String,
    /// Lower-case variant strings matched as substrings of the query
    pub variants: Vec<String>,
    /// Ministry program code (empty for injected tables that don't carry one)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ministry_code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub school_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub domain: String,
}

impl Entity {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        school_id: impl Into<String>,
        variants: &[&str],
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            school_id: school_id.into(),
            variants: variants.iter().map(|v| v.to_lowercase()).collect(),
            ministry_code: String::new(),
            school_name: String::new(),
            domain: String::new(),
        }
    }

    /// True if any variant occurs in the already lower-cased text
    pub fn matches_lowered(&self, lowered: &str) -> bool {
        self.variants.iter().any(|v| lowered.contains(v.as_str()))
    }
}

/// Immutable, ordered table of program entities
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
}

impl EntityRegistry {
    /// Registry backed by the built-in university program table
    pub fn builtin() -> Self {
        Self {
            entities: catalog::builtin_entities(),
        }
    }

    /// Registry over a caller-supplied table; iteration order is the given order
    pub fn from_entities(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Exact lookup by entity id
    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// First registered entity with any variant contained in the query
    pub fn extract(&self, query: &str) -> Option<&Entity> {
        let lowered = query.to_lowercase();
        self.entities.iter().find(|e| e.matches_lowered(&lowered))
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Scans a query against a shared registry
#[derive(Debug, Clone, Copy)]
pub struct EntityExtractor<'r> {
    registry: &'r EntityRegistry,
}

impl<'r> EntityExtractor<'r> {
    pub fn new(registry: &'r EntityRegistry) -> Self {
        Self { registry }
    }

    pub fn extract(&self, query: &str) -> Option<&'r Entity> {
        self.registry.extract(query)
    }
}
