//! Hierarchical views derived from the flat stores
//!
//! Depth-first, pre-order: each category is followed by its services, then
//! by its subcategories, before moving on to the next sibling. A category is
//! entered at most once, so the walk terminates even if parent links loop.

use crate::catalog::Catalog;
use crate::category::Category;
use crate::id::CategoryId;
use crate::service::Service;
use serde::Serialize;
use std::collections::HashSet;

/// A category with its services and subcategories
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub category: Category,
    pub services: Vec<Service>,
    pub children: Vec<TreeNode>,
}

/// One line of a flattened tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeItem {
    Category(Category),
    Service(Service),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeEntry {
    pub depth: usize,
    pub item: TreeItem,
}

/// Snapshot of the catalog as a tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogTree {
    pub roots: Vec<TreeNode>,
    /// Services with no category at all, shown after the tree.
    /// Only collected when the tree starts at the top level.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub loose: Vec<Service>,
}

impl CatalogTree {
    /// Build the tree below `root`, or the whole catalog for `None`
    pub fn build(catalog: &Catalog, root: Option<&CategoryId>) -> Self {
        let mut visited = HashSet::new();
        if let Some(id) = root {
            visited.insert(id.clone());
        }

        let roots = build_level(catalog, root, &mut visited);
        let loose = match root {
            None => catalog
                .services()
                .iter()
                .filter(|s| s.is_unassigned())
                .cloned()
                .collect(),
            Some(_) => Vec::new(),
        };

        Self { roots, loose }
    }

    /// Flatten into render order with nesting depth
    ///
    /// Services sit one level deeper than their category. Loose services
    /// come last at depth 0.
    pub fn outline(&self) -> Vec<TreeEntry> {
        let mut entries = Vec::new();
        for node in &self.roots {
            flatten(node, 0, &mut entries);
        }
        entries.extend(self.loose.iter().map(|s| TreeEntry {
            depth: 0,
            item: TreeItem::Service(s.clone()),
        }));
        entries
    }

    /// Category-only outline, e.g. for picking memberships
    pub fn categories_only(
        catalog: &Catalog,
        root: Option<&CategoryId>,
    ) -> Vec<(usize, Category)> {
        let mut out = Vec::new();
        let mut visited = HashSet::new();
        if let Some(id) = root {
            visited.insert(id.clone());
        }
        walk_categories(catalog, root, 0, &mut visited, &mut out);
        out
    }

    /// Number of category nodes in the tree
    pub fn category_count(&self) -> usize {
        fn count(node: &TreeNode) -> usize {
            1 + node.children.iter().map(count).sum::<usize>()
        }
        self.roots.iter().map(count).sum()
    }
}

fn build_level(
    catalog: &Catalog,
    parent: Option<&CategoryId>,
    visited: &mut HashSet<CategoryId>,
) -> Vec<TreeNode> {
    let mut nodes = Vec::new();
    for category in catalog.children_of(parent) {
        if !visited.insert(category.id.clone()) {
            continue;
        }
        let services = catalog.services_of(&category.id);
        let children = build_level(catalog, Some(&category.id), visited);
        nodes.push(TreeNode {
            category,
            services,
            children,
        });
    }
    nodes
}

fn walk_categories(
    catalog: &Catalog,
    parent: Option<&CategoryId>,
    depth: usize,
    visited: &mut HashSet<CategoryId>,
    out: &mut Vec<(usize, Category)>,
) {
    for category in catalog.children_of(parent) {
        if !visited.insert(category.id.clone()) {
            continue;
        }
        let id = category.id.clone();
        out.push((depth, category));
        walk_categories(catalog, Some(&id), depth + 1, visited, out);
    }
}

fn flatten(node: &TreeNode, depth: usize, out: &mut Vec<TreeEntry>) {
    out.push(TreeEntry {
        depth,
        item: TreeItem::Category(node.category.clone()),
    });
    out.extend(node.services.iter().map(|s| TreeEntry {
        depth: depth + 1,
        item: TreeItem::Service(s.clone()),
    }));
    for child in &node.children {
        flatten(child, depth + 1, out);
    }
}
