//! Category data model and store
//!
//! Categories live in one flat, insertion-ordered collection. The hierarchy
//! is never stored; it is derived on demand by matching `parent_id`.

use crate::id::{CategoryId, IdGenerator};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Reserved ID of the catch-all category
pub const UNCATEGORIZED: &str = "uncategorized";

/// A named grouping node, optionally parented by another category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier, immutable after creation
    pub id: CategoryId,

    /// Display name
    pub name: String,

    /// Free-text description (may be empty)
    #[serde(default)]
    pub description: String,

    /// Parent category, or none for a root.
    /// A plain reference by ID; the parent need not exist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CategoryId>,
}

impl Category {
    pub fn new(
        id: CategoryId,
        name: impl Into<String>,
        description: impl Into<String>,
        parent_id: Option<CategoryId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            parent_id,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// The reserved bucket; presentation layers offer no actions on it
    pub fn is_uncategorized(&self) -> bool {
        self.id == UNCATEGORIZED
    }

    pub fn is_child_of(&self, parent_id: Option<&CategoryId>) -> bool {
        self.parent_id.as_ref() == parent_id
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.id, self.name)
    }
}

/// Names must contain something other than whitespace
pub(crate) fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}

/// Authoritative holder of all categories
#[derive(Debug, Clone, Default)]
pub struct CategoryStore {
    categories: Vec<Category>,
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a category under `parent_id` (or as a root)
    ///
    /// Blank names are ignored: nothing is created and `None` is returned.
    /// The parent is not checked; an unknown parent yields an orphan.
    pub fn add(
        &mut self,
        ids: &mut IdGenerator,
        name: &str,
        description: &str,
        parent_id: Option<CategoryId>,
    ) -> Option<Category> {
        if !is_valid_name(name) {
            debug!(name, "ignoring category with blank name");
            return None;
        }

        let category = Category::new(ids.next_category_id(), name, description, parent_id);
        debug!(
            id = %category.id,
            parent = ?category.parent_id.as_ref().map(CategoryId::as_str),
            "added category"
        );
        self.categories.push(category.clone());
        Some(category)
    }

    /// Append a category with a pre-assigned ID (seed data)
    pub(crate) fn insert(&mut self, category: Category) {
        self.categories.push(category);
    }

    /// Categories whose parent is `parent_id`, in insertion order
    ///
    /// `None` returns the root categories.
    pub fn children_of(&self, parent_id: Option<&CategoryId>) -> Vec<Category> {
        self.categories
            .iter()
            .filter(|c| c.is_child_of(parent_id))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    pub fn contains(&self, id: &CategoryId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
