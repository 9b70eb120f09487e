//! Service data model and store
//!
//! A service belongs to any number of categories. Membership is kept on the
//! service as an ordered list of category IDs without duplicates.

use crate::category::{UNCATEGORIZED, is_valid_name};
use crate::id::{CategoryId, IdGenerator, ServiceId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// A named offering that can belong to zero or more categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Unique identifier, immutable after creation
    pub id: ServiceId,

    /// Display name
    pub name: String,

    /// Free-text description (may be empty)
    #[serde(default)]
    pub description: String,

    /// Categories this service is listed under.
    /// Empty means the service has not been placed anywhere.
    #[serde(default)]
    pub category_ids: Vec<CategoryId>,
}

impl Service {
    pub fn new(
        id: ServiceId,
        name: impl Into<String>,
        description: impl Into<String>,
        category_ids: Vec<CategoryId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            category_ids: dedup_ids(category_ids),
        }
    }

    pub fn belongs_to(&self, category_id: &CategoryId) -> bool {
        self.category_ids.contains(category_id)
    }

    /// No category at all
    pub fn is_unassigned(&self) -> bool {
        self.category_ids.is_empty()
    }

    /// No category other than the reserved bucket
    pub fn is_uncategorized(&self) -> bool {
        self.category_ids.iter().all(|id| id == UNCATEGORIZED)
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.id, self.name)
    }
}

/// Drop repeated IDs, keeping the first occurrence
fn dedup_ids(ids: Vec<CategoryId>) -> Vec<CategoryId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

/// Authoritative holder of all services
#[derive(Debug, Clone, Default)]
pub struct ServiceStore {
    services: Vec<Service>,
}

impl ServiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service listed under `category_ids`
    ///
    /// Blank names are ignored: nothing is created and `None` is returned.
    /// Category IDs are not checked against any store.
    pub fn add(
        &mut self,
        ids: &mut IdGenerator,
        name: &str,
        description: &str,
        category_ids: Vec<CategoryId>,
    ) -> Option<Service> {
        if !is_valid_name(name) {
            debug!(name, "ignoring service with blank name");
            return None;
        }

        let service = Service::new(ids.next_service_id(), name, description, category_ids);
        debug!(
            id = %service.id,
            categories = service.category_ids.len(),
            "added service"
        );
        self.services.push(service.clone());
        Some(service)
    }

    /// Append a service with a pre-assigned ID (seed data)
    pub(crate) fn insert(&mut self, service: Service) {
        self.services.push(service);
    }

    /// Services listed under `category_id`, in insertion order
    pub fn services_of(&self, category_id: &CategoryId) -> Vec<Service> {
        self.services
            .iter()
            .filter(|s| s.belongs_to(category_id))
            .cloned()
            .collect()
    }

    /// Services with no membership besides the reserved bucket
    pub fn uncategorized_services(&self) -> Vec<Service> {
        self.services
            .iter()
            .filter(|s| s.is_uncategorized())
            .cloned()
            .collect()
    }

    /// Overwrite a service's categories with `category_ids`
    ///
    /// The previous set is discarded entirely. Returns false, changing
    /// nothing, when no service has `service_id`.
    pub fn replace_categories(
        &mut self,
        service_id: &ServiceId,
        category_ids: Vec<CategoryId>,
    ) -> bool {
        match self.services.iter_mut().find(|s| &s.id == service_id) {
            Some(service) => {
                service.category_ids = dedup_ids(category_ids);
                debug!(
                    id = %service_id,
                    categories = service.category_ids.len(),
                    "replaced service categories"
                );
                true
            }
            None => {
                debug!(id = %service_id, "ignoring category update for unknown service");
                false
            }
        }
    }

    pub fn get(&self, id: &ServiceId) -> Option<&Service> {
        self.services.iter().find(|s| &s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Service> {
        self.services.iter()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cats(ids: &[&str]) -> Vec<CategoryId> {
        ids.iter().map(|id| CategoryId::from(*id)).collect()
    }

    #[test]
    fn test_add_and_membership() {
        let mut ids = IdGenerator::new();
        let mut store = ServiceStore::new();

        let x = store
            .add(&mut ids, "X", "", cats(&["cat2", "cat3"]))
            .unwrap();
        store.add(&mut ids, "Y", "", cats(&["cat3"]));

        assert_eq!(store.services_of(&"cat2".into()), vec![x.clone()]);
        assert_eq!(store.services_of(&"cat3".into()).len(), 2);
        assert!(store.services_of(&"cat4".into()).is_empty());
        assert!(store.uncategorized_services().is_empty());
    }

    #[test]
    fn test_blank_name_is_ignored() {
        let mut ids = IdGenerator::new();
        let mut store = ServiceStore::new();

        assert!(store.add(&mut ids, "  ", "desc", Vec::new()).is_none());
        assert!(store.add(&mut ids, "", "desc", cats(&["cat2"])).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_uncategorized_covers_empty_and_bucket() {
        let mut ids = IdGenerator::new();
        let mut store = ServiceStore::new();

        let loose = store.add(&mut ids, "Loose", "", Vec::new()).unwrap();
        let bucket = store
            .add(&mut ids, "Bucket", "", cats(&[UNCATEGORIZED]))
            .unwrap();
        store.add(&mut ids, "Placed", "", cats(&["cat2", UNCATEGORIZED]));

        assert_eq!(store.uncategorized_services(), vec![loose, bucket]);
    }

    #[test]
    fn test_replace_is_total() {
        let mut ids = IdGenerator::new();
        let mut store = ServiceStore::new();
        let svc = store.add(&mut ids, "Cut", "", cats(&["cat2"])).unwrap();

        assert!(store.replace_categories(&svc.id, cats(&["cat3"])));

        assert!(store.services_of(&"cat2".into()).is_empty());
        assert_eq!(store.services_of(&"cat3".into())[0].id, svc.id);

        assert!(store.replace_categories(&svc.id, Vec::new()));
        assert_eq!(store.uncategorized_services()[0].id, svc.id);
    }

    #[test]
    fn test_replace_unknown_service_is_noop() {
        let mut ids = IdGenerator::new();
        let mut store = ServiceStore::new();
        let svc = store.add(&mut ids, "Cut", "", cats(&["cat2"])).unwrap();

        assert!(!store.replace_categories(&"svc-missing".into(), cats(&["cat3"])));
        assert_eq!(store.get(&svc.id), Some(&svc));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_duplicate_memberships_collapse() {
        let mut ids = IdGenerator::new();
        let mut store = ServiceStore::new();

        let svc = store
            .add(&mut ids, "Dup", "", cats(&["cat3", "cat2", "cat3"]))
            .unwrap();
        assert_eq!(svc.category_ids, cats(&["cat3", "cat2"]));

        store.replace_categories(&svc.id, cats(&["cat4", "cat4"]));
        assert_eq!(store.get(&svc.id).unwrap().category_ids, cats(&["cat4"]));
        assert_eq!(store.services_of(&"cat4".into()).len(), 1);
    }
}
