//! Item catalog.
//!
//! The catalog is a static, ordered registry of item definitions loaded once at
//! startup. Order is stable and is the order used for uniform random choice.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::random::RandomSource;

/// Built-in item set as `(id, name, color)`.
const BUILTIN_ITEMS: &[(&str, &str, &str)] = &[
    ("stone", "Stone", "#808080"),
    ("dirt", "Dirt", "#8B7355"),
    ("grass", "Grass Block", "#2d5016"),
    ("wood", "Oak Log", "#6B4423"),
    ("planks", "Oak Planks", "#C19A6B"),
    ("sand", "Sand", "#E0D896"),
    ("cobblestone", "Cobblestone", "#707070"),
    ("oak_leaves", "Oak Leaves", "#2d5016"),
    ("iron_ore", "Iron Ore", "#8B6914"),
    ("coal_ore", "Coal Ore", "#1a1a1a"),
    ("gold_ore", "Gold Ore", "#E6AD00"),
    ("diamond_ore", "Diamond Ore", "#117a9c"),
    ("bookshelf", "Bookshelf", "#8B4513"),
];

/// Immutable definition of a single item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Unique identifier (e.g., "stone").
    pub id: String,
    /// Display name shown in notifications.
    pub name: String,
    /// Hex color (`#RRGGBB`) used by presenters.
    pub color: String,
}

impl ItemDefinition {
    /// Create a new definition.
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Errors emitted while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Wrap IO errors when reading catalog files.
    #[error("failed to read item catalog: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap serde parsing issues.
    #[error("failed to parse item catalog: {0}")]
    Parse(#[from] serde_json::Error),
    /// A catalog must define at least one item.
    #[error("item catalog is empty")]
    Empty,
    /// Two definitions share an id.
    #[error("duplicate item id `{0}`")]
    DuplicateId(String),
    /// A definition failed validation.
    #[error("invalid item definition `{id}`: {reason}")]
    InvalidDefinition {
        /// Id of the offending definition.
        id: String,
        /// What was wrong with it.
        reason: &'static str,
    },
}

/// Ordered registry of item definitions with lookup by id.
#[derive(Debug, Clone)]
pub struct ItemCatalog {
    items: Vec<ItemDefinition>,
    by_id: HashMap<String, usize>,
}

impl ItemCatalog {
    /// Build a catalog from definitions, validating ids, names and colors.
    pub fn new(items: Vec<ItemDefinition>) -> Result<Self, CatalogError> {
        if items.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut by_id = HashMap::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            validate_definition(item)?;
            if by_id.insert(item.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
        }

        Ok(Self { items, by_id })
    }

    /// The built-in item set.
    pub fn builtin() -> Self {
        let items: Vec<ItemDefinition> = BUILTIN_ITEMS
            .iter()
            .map(|(id, name, color)| ItemDefinition::new(*id, *name, *color))
            .collect();
        let by_id = items
            .iter()
            .enumerate()
            .map(|(index, item)| (item.id.clone(), index))
            .collect();
        Self { items, by_id }
    }

    /// Load a catalog from a JSON array of definitions.
    pub fn from_json_str(input: &str) -> Result<Self, CatalogError> {
        let items: Vec<ItemDefinition> = serde_json::from_str(input)?;
        Self::new(items)
    }

    /// Load a catalog from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Look up a definition by id.
    pub fn get(&self, id: &str) -> Option<&ItemDefinition> {
        self.by_id.get(id).map(|&index| &self.items[index])
    }

    /// Whether `id` names a defined item.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Definitions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.items.iter()
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no definitions.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pick a definition uniformly at random.
    pub fn choose(&self, random: &mut dyn RandomSource) -> &ItemDefinition {
        &self.items[random.next_below(self.items.len())]
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_definition(item: &ItemDefinition) -> Result<(), CatalogError> {
    let invalid = |reason| CatalogError::InvalidDefinition {
        id: item.id.clone(),
        reason,
    };

    if item.id.trim().is_empty() {
        return Err(invalid("id cannot be empty"));
    }
    if item.name.trim().is_empty() {
        return Err(invalid("name cannot be empty"));
    }
    let hex = item
        .color
        .strip_prefix('#')
        .ok_or_else(|| invalid("color must start with '#'"))?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid("color must be #RRGGBB"));
    }
    Ok(())
}
