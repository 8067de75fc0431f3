//! Content entity types and their natural metadata fields.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a request names an entity type outside the closed set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unsupported entity type: {0}")]
pub struct InvalidEntityType(pub String);

/// The closed set of publishable content types.
///
/// Each variant corresponds to one content table; metadata resolution and
/// override storage are dispatched over this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Village,
    District,
    Provider,
    Listing,
    Package,
    Product,
    Story,
    Event,
    Page,
    Thought,
}

impl EntityType {
    /// All supported entity types.
    pub const ALL: [EntityType; 10] = [
        EntityType::Village,
        EntityType::District,
        EntityType::Provider,
        EntityType::Listing,
        EntityType::Package,
        EntityType::Product,
        EntityType::Story,
        EntityType::Event,
        EntityType::Page,
        EntityType::Thought,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Village => "village",
            EntityType::District => "district",
            EntityType::Provider => "provider",
            EntityType::Listing => "listing",
            EntityType::Package => "package",
            EntityType::Product => "product",
            EntityType::Story => "story",
            EntityType::Event => "event",
            EntityType::Page => "page",
            EntityType::Thought => "thought",
        }
    }

    /// Whether this content type carries a natural image field of its own.
    /// Types without one fall through to the global default image directly.
    pub fn has_image(&self) -> bool {
        !matches!(self, EntityType::Page | EntityType::Thought)
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = InvalidEntityType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityType::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| InvalidEntityType(s.to_string()))
    }
}

/// Natural metadata fields of a content row, read from its own table.
/// These sit between the entity override layer and the global defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NaturalFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub slug: Option<String>,
}
