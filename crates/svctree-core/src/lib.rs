//! svctree-core: Core library for the svctree service catalog
//!
//! Holds the category and service stores, the seed dataset, and the tree
//! traversal that presentation layers render. Everything lives in memory.

pub mod catalog;
pub mod category;
pub mod config;
pub mod error;
pub mod id;
pub mod seed;
pub mod service;
pub mod tree;

pub use catalog::Catalog;
pub use category::{Category, CategoryStore, UNCATEGORIZED};
pub use config::Config;
pub use error::Error;
pub use id::{CategoryId, IdGenerator, ServiceId, generate_id};
pub use service::{Service, ServiceStore};
pub use tree::{CatalogTree, TreeEntry, TreeItem, TreeNode};

/// Result type for svctree operations
pub type Result<T> = std::result::Result<T, Error>;
