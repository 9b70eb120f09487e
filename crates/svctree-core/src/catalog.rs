//! The catalog: both stores plus the ID generator they share
//!
//! This is the surface a presentation layer talks to. Queries return owned
//! snapshots; mutations either apply fully or not at all.

use crate::category::{Category, CategoryStore};
use crate::config::Config;
use crate::id::{CategoryId, IdGenerator, ServiceId};
use crate::seed;
use crate::service::{Service, ServiceStore};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Catalog {
    categories: CategoryStore,
    services: ServiceStore,
    ids: IdGenerator,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Catalog {
    /// A catalog with no categories or services
    pub fn empty() -> Self {
        Self::with_ids(IdGenerator::new())
    }

    /// A catalog pre-populated with the seed dataset
    pub fn seeded() -> Self {
        let mut catalog = Self::empty();
        catalog.load_seed();
        catalog
    }

    /// Build a catalog according to `config` (ID prefixes, seeding)
    pub fn from_config(config: &Config) -> Self {
        let mut catalog = Self::with_ids(IdGenerator::with_prefixes(
            &config.category_prefix,
            &config.service_prefix,
        ));
        if config.seed {
            catalog.load_seed();
        }
        catalog
    }

    fn with_ids(ids: IdGenerator) -> Self {
        Self {
            categories: CategoryStore::new(),
            services: ServiceStore::new(),
            ids,
        }
    }

    /// Wrap a hand-built category store, bypassing `add`
    #[cfg(test)]
    pub(crate) fn with_categories(categories: CategoryStore) -> Self {
        let mut ids = IdGenerator::new();
        for category in categories.iter() {
            ids.reserve(&category.id);
        }
        Self {
            categories,
            services: ServiceStore::new(),
            ids,
        }
    }

    fn load_seed(&mut self) {
        for category in seed::categories() {
            self.ids.reserve(&category.id);
            self.categories.insert(category);
        }
        for service in seed::services() {
            self.ids.reserve(&service.id);
            self.services.insert(service);
        }
        debug!(
            categories = self.categories.len(),
            services = self.services.len(),
            "loaded seed catalog"
        );
    }

    pub fn categories(&self) -> &CategoryStore {
        &self.categories
    }

    pub fn services(&self) -> &ServiceStore {
        &self.services
    }

    /// See [`CategoryStore::add`]
    pub fn add_category(
        &mut self,
        name: &str,
        description: &str,
        parent_id: Option<CategoryId>,
    ) -> Option<Category> {
        self.categories
            .add(&mut self.ids, name, description, parent_id)
    }

    /// See [`ServiceStore::add`]
    pub fn add_service(
        &mut self,
        name: &str,
        description: &str,
        category_ids: Vec<CategoryId>,
    ) -> Option<Service> {
        self.services
            .add(&mut self.ids, name, description, category_ids)
    }

    /// See [`ServiceStore::replace_categories`]
    pub fn replace_categories(
        &mut self,
        service_id: &ServiceId,
        category_ids: Vec<CategoryId>,
    ) -> bool {
        self.services.replace_categories(service_id, category_ids)
    }

    pub fn children_of(&self, parent_id: Option<&CategoryId>) -> Vec<Category> {
        self.categories.children_of(parent_id)
    }

    pub fn services_of(&self, category_id: &CategoryId) -> Vec<Service> {
        self.services.services_of(category_id)
    }

    pub fn uncategorized_services(&self) -> Vec<Service> {
        self.services.uncategorized_services()
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.get(id)
    }

    pub fn service(&self, id: &ServiceId) -> Option<&Service> {
        self.services.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ids_of(categories: &[Category]) -> Vec<&str> {
        categories.iter().map(|c| c.id.as_str()).collect()
    }

    fn service_ids(services: &[Service]) -> Vec<&str> {
        services.iter().map(|s| s.id.as_str()).collect()
    }

    fn cat(id: &str) -> CategoryId {
        CategoryId::from(id)
    }

    #[test]
    fn test_generated_ids_are_unique_and_avoid_seed() {
        let mut catalog = Catalog::seeded();
        let mut seen: HashSet<String> = catalog
            .categories()
            .iter()
            .map(|c| c.id.to_string())
            .chain(catalog.services().iter().map(|s| s.id.to_string()))
            .collect();

        for i in 0..200 {
            let c = catalog.add_category(&format!("c{i}"), "", None).unwrap();
            let s = catalog.add_service(&format!("s{i}"), "", Vec::new()).unwrap();
            assert!(seen.insert(c.id.to_string()));
            assert!(seen.insert(s.id.to_string()));
        }
    }

    #[test]
    fn test_blank_names_leave_stores_unchanged() {
        let mut catalog = Catalog::seeded();

        assert!(catalog.add_category("", "d", Some(cat("cat1"))).is_none());
        assert!(catalog.add_service("  ", "d", Vec::new()).is_none());

        assert_eq!(catalog.categories().len(), 11);
        assert_eq!(catalog.services().len(), 16);
    }

    #[test]
    fn test_membership_in_several_categories() {
        let mut catalog = Catalog::seeded();
        let x = catalog
            .add_service("X", "", vec![cat("cat2"), cat("cat3")])
            .unwrap();

        assert!(catalog.services_of(&cat("cat2")).iter().any(|s| s.name == "X"));
        assert!(catalog.services_of(&cat("cat3")).iter().any(|s| s.name == "X"));
        assert!(!catalog.uncategorized_services().contains(&x));
    }

    #[test]
    fn test_replace_moves_service() {
        let mut catalog = Catalog::seeded();
        let svc1 = ServiceId::from("svc1");
        assert!(catalog.services_of(&cat("cat2")).iter().any(|s| s.id == svc1));

        assert!(catalog.replace_categories(&svc1, vec![cat("cat3")]));

        assert!(!catalog.services_of(&cat("cat2")).iter().any(|s| s.id == svc1));
        assert!(catalog.services_of(&cat("cat3")).iter().any(|s| s.id == svc1));
    }

    #[test]
    fn test_seed_roots_and_children() {
        let catalog = Catalog::seeded();

        assert_eq!(
            ids_of(&catalog.children_of(None)),
            ["cat1", "cat5", "cat8", "uncategorized"]
        );
        assert_eq!(
            ids_of(&catalog.children_of(Some(&cat("cat1")))),
            ["cat2", "cat3", "cat4"]
        );
        assert_eq!(
            ids_of(&catalog.children_of(Some(&cat("cat5")))),
            ["cat6", "cat7"]
        );
        assert!(catalog.children_of(Some(&cat("cat2"))).is_empty());
    }

    #[test]
    fn test_queries_are_repeatable() {
        let catalog = Catalog::seeded();

        assert_eq!(catalog.children_of(None), catalog.children_of(None));
        assert_eq!(
            catalog.services_of(&cat("cat9")),
            catalog.services_of(&cat("cat9"))
        );
        assert_eq!(
            service_ids(&catalog.services_of(&cat("cat9"))),
            ["svc10", "svc11"]
        );
    }

    #[test]
    fn test_seed_uncategorized_bucket() {
        let catalog = Catalog::seeded();
        assert_eq!(
            service_ids(&catalog.uncategorized_services()),
            ["svc14", "svc15", "svc16"]
        );
    }

    #[test]
    fn test_new_subcategory_with_service() {
        let mut catalog = Catalog::seeded();

        let nails = catalog
            .add_category("Nails", "", Some(cat("cat1")))
            .unwrap();
        let children = catalog.children_of(Some(&cat("cat1")));
        assert_eq!(children.len(), 4);
        assert_eq!(children.last().map(|c| c.name.as_str()), Some("Nails"));

        let manicure = catalog
            .add_service("Manicure", "", vec![nails.id.clone()])
            .unwrap();
        assert_eq!(catalog.services_of(&nails.id), vec![manicure]);
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            seed: false,
            category_prefix: "grp".into(),
            service_prefix: "offer".into(),
            ..Config::default()
        };
        let mut catalog = Catalog::from_config(&config);

        assert!(catalog.categories().is_empty());
        assert!(catalog.services().is_empty());

        let c = catalog.add_category("Spa", "", None).unwrap();
        let s = catalog.add_service("Sauna", "", vec![c.id.clone()]).unwrap();
        assert!(c.id.as_str().starts_with("grp-"));
        assert!(s.id.as_str().starts_with("offer-"));
    }

    #[test]
    fn test_orphans_are_accepted() {
        let mut catalog = Catalog::empty();
        let ghost = cat("ghost");

        let orphan = catalog.add_category("Orphan", "", Some(ghost.clone())).unwrap();
        let stray = catalog.add_service("Stray", "", vec![ghost.clone()]).unwrap();

        assert!(catalog.children_of(None).is_empty());
        assert!(catalog.category(&ghost).is_none());
        assert_eq!(catalog.category(&orphan.id), Some(&orphan));
        assert_eq!(catalog.services_of(&ghost), vec![stray]);
    }
}
