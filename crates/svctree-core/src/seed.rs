//! Seed dataset: a small beauty salon catalog
//!
//! Three root categories with two or three children each, the reserved
//! uncategorized bucket, and sixteen services spread over the leaves.

use crate::category::{Category, UNCATEGORIZED};
use crate::service::Service;

const CATEGORIES: &[(&str, &str, &str, Option<&str>)] = &[
    (
        "cat1",
        "Hair Services",
        "Professional hair care and styling services",
        None,
    ),
    (
        "cat2",
        "Haircuts",
        "Professional haircutting services for all hair types",
        Some("cat1"),
    ),
    (
        "cat3",
        "Hair Coloring",
        "Professional hair coloring and highlighting services",
        Some("cat1"),
    ),
    (
        "cat4",
        "Hair Treatments",
        "Specialized hair treatments and deep conditioning",
        Some("cat1"),
    ),
    (
        "cat5",
        "Massage",
        "Professional massage therapy services",
        None,
    ),
    (
        "cat6",
        "Body Massage",
        "Full body massage and relaxation treatments",
        Some("cat5"),
    ),
    (
        "cat7",
        "Facial Massage",
        "Specialized facial massage and treatments",
        Some("cat5"),
    ),
    (
        "cat8",
        "Cosmetics",
        "Professional makeup and skincare services",
        None,
    ),
    (
        "cat9",
        "Makeup",
        "Professional makeup application and consultation",
        Some("cat8"),
    ),
    (
        "cat10",
        "Skincare",
        "Professional skincare treatments and consultation",
        Some("cat8"),
    ),
    (
        UNCATEGORIZED,
        "Uncategorized",
        "Services without a specific category",
        None,
    ),
];

const SERVICES: &[(&str, &str, &str, &str)] = &[
    (
        "svc1",
        "Men's Haircut",
        "Professional haircut tailored to men's styles",
        "cat2",
    ),
    (
        "svc2",
        "Women's Haircut",
        "Professional haircut tailored to women's styles",
        "cat2",
    ),
    (
        "svc3",
        "Highlights",
        "Professional hair highlighting service",
        "cat3",
    ),
    ("svc4", "Full Color", "Complete hair coloring service", "cat3"),
    (
        "svc5",
        "Keratin Treatment",
        "Professional keratin smoothing treatment",
        "cat4",
    ),
    (
        "svc6",
        "Deep Conditioning",
        "Intensive hair conditioning treatment",
        "cat4",
    ),
    (
        "svc7",
        "Swedish Massage",
        "Relaxing full body Swedish massage",
        "cat6",
    ),
    (
        "svc8",
        "Deep Tissue Massage",
        "Intensive deep tissue massage therapy",
        "cat6",
    ),
    (
        "svc9",
        "Facial Massage",
        "Relaxing facial massage treatment",
        "cat7",
    ),
    (
        "svc10",
        "Bridal Makeup",
        "Complete bridal makeup package",
        "cat9",
    ),
    (
        "svc11",
        "Evening Makeup",
        "Professional evening makeup application",
        "cat9",
    ),
    (
        "svc12",
        "Facial Treatment",
        "Professional facial treatment and care",
        "cat10",
    ),
    (
        "svc13",
        "Skin Consultation",
        "Professional skin analysis and consultation",
        "cat10",
    ),
    (
        "svc14",
        "Gift Card",
        "Purchase a gift card for any service",
        UNCATEGORIZED,
    ),
    (
        "svc15",
        "Consultation",
        "General consultation for any service",
        UNCATEGORIZED,
    ),
    (
        "svc16",
        "Package Deal",
        "Custom package combining multiple services",
        UNCATEGORIZED,
    ),
];

/// Seed categories in their canonical order
pub fn categories() -> Vec<Category> {
    CATEGORIES
        .iter()
        .map(|&(id, name, description, parent)| {
            Category::new(id.into(), name, description, parent.map(Into::into))
        })
        .collect()
}

/// Seed services in their canonical order
pub fn services() -> Vec<Service> {
    SERVICES
        .iter()
        .map(|&(id, name, description, category)| {
            Service::new(id.into(), name, description, vec![category.into()])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_sizes() {
        assert_eq!(categories().len(), 11);
        assert_eq!(services().len(), 16);
    }

    #[test]
    fn test_seed_ids_are_unique() {
        let category_ids: HashSet<_> = categories().into_iter().map(|c| c.id).collect();
        let service_ids: HashSet<_> = services().into_iter().map(|s| s.id).collect();
        assert_eq!(category_ids.len(), 11);
        assert_eq!(service_ids.len(), 16);
    }

    #[test]
    fn test_seed_services_reference_seed_categories() {
        let category_ids: HashSet<_> = categories().into_iter().map(|c| c.id).collect();
        for service in services() {
            for id in &service.category_ids {
                assert!(category_ids.contains(id), "{} -> {}", service.id, id);
            }
        }
    }
}
