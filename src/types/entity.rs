//! Entity catalog types.
//!
//! An entity is a tracked political actor (a country or regime) identified by
//! a lowercase id and matched in text through its aliases.

use serde::{Deserialize, Serialize};

/// Entity ids of the standard catalog, in catalog order.
pub const STANDARD_ENTITIES: [&str; 4] = ["china", "north_korea", "usa", "russia"];

/// A tracked entity and its surface forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Canonical id, e.g. `north_korea`.
    pub id: String,
    /// Surface forms matched case-insensitively, in priority order.
    pub aliases: Vec<String>,
}

/// Ordered, immutable mapping from entity id to aliases.
///
/// Built once with [`with_entity`](Self::with_entity) and then shared
/// read-only by the detector and analyzers.
///
/// ```rust
/// use forseti::EntityCatalog;
///
/// let catalog = EntityCatalog::new()
///     .with_entity("france", ["France", "French", "Paris", "Macron"]);
/// assert!(catalog.contains("france"));
/// assert_eq!(catalog.aliases("france").map(<[String]>::len), Some(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityCatalog {
    entities: Vec<Entity>,
}

impl EntityCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard catalog: China, North Korea, USA and Russia.
    pub fn standard() -> Self {
        Self::new()
            .with_entity("china", ["China", "Chinese", "Beijing", "Xi Jinping", "CCP"])
            .with_entity(
                "north_korea",
                ["North Korea", "DPRK", "Kim Jong-un", "Pyongyang"],
            )
            .with_entity(
                "usa",
                ["USA", "United States", "America", "Washington", "Biden"],
            )
            .with_entity("russia", ["Russia", "Russian", "Putin", "Moscow"])
    }

    /// Add an entity, replacing the aliases of an existing id in place.
    pub fn with_entity<I, S>(mut self, id: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = id.into();
        let aliases: Vec<String> = aliases.into_iter().map(Into::into).collect();
        match self.entities.iter_mut().find(|e| e.id == id) {
            Some(existing) => existing.aliases = aliases,
            None => self.entities.push(Entity { id, aliases }),
        }
        self
    }

    /// Aliases for an entity id, or `None` for ids outside the catalog.
    pub fn aliases(&self, id: &str) -> Option<&[String]> {
        self.entities
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.aliases.as_slice())
    }

    /// Whether the catalog tracks this id.
    pub fn contains(&self, id: &str) -> bool {
        self.entities.iter().any(|e| e.id == id)
    }

    /// Entity ids in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().map(|e| e.id.as_str())
    }

    /// Entities in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
